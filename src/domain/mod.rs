// ==========================================
// 整机配置推荐系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod component;
pub mod recommendation;
pub mod types;

// 重导出核心类型
pub use component::Component;
pub use recommendation::{ConfirmedQuote, Recommendation, SelectedComponent, TOTAL_PRICE_KEY};
pub use types::{ComponentType, UnknownComponentType, SLOT_COUNT, SLOT_ORDER};
