// ==========================================
// 整机配置推荐系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 CLI / 上层 Web 服务调用
// ==========================================

pub mod error;
pub mod recommend_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use recommend_api::{ComponentSuggestion, ConfirmResponse, RecommendApi, STATUS_CONFIRMED};
pub use validator::{parse_component_type, validate_budget};
