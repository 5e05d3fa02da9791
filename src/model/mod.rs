// ==========================================
// 整机配置推荐系统 - 模型层
// ==========================================
// 职责: 离线训练产物的只读封装（编码表 + 评分器）
// 红线: 不含训练逻辑
// ==========================================

pub mod artifact;
pub mod encoding;
pub mod error;
pub mod scorer;

pub use artifact::{ArtifactFile, ModelArtifact};
pub use encoding::EncodingTable;
pub use error::{ArtifactError, EncodingError};
pub use scorer::{BuildScorer, HistoricalMatchScorer};
