// ==========================================
// 整机配置推荐系统 - 引擎层
// ==========================================
// 职责: 选配规则引擎（抽样 / 模型引导 / 贪心回退 / 重试编排）
// 红线: Engine 不拼 SQL，经由 ComponentCatalog trait 访问目录
// ==========================================

pub mod assembler;
pub mod catalog;
pub mod error;
pub mod greedy;
pub mod input_vector;
pub mod model_guided;
pub mod retry;
pub mod sampler;

// 重导出核心引擎
pub use assembler::{AssemblyReport, BuildAssembler, SelectionPath};
pub use catalog::{ComponentCatalog, QuoteStore};
pub use error::{AssemblyError, AttemptError};
pub use greedy::{pick_max_within, GreedyFiller};
pub use input_vector::InputVector;
pub use model_guided::ModelGuidedSelector;
pub use retry::RetryPolicy;
pub use sampler::{CandidateSampler, DEFAULT_SAMPLE_SIZE};
