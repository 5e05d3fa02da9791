// ==========================================
// 整机配置推荐系统 - 引擎层错误类型
// ==========================================
// AttemptError: 单次尝试内部的失败，不越过引擎边界
// AssemblyError: 引擎对调用方可见的失败
// ==========================================

use crate::domain::types::ComponentType;
use crate::model::error::EncodingError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 单次尝试内部错误
#[derive(Error, Debug)]
pub enum AttemptError {
    /// 槽位未能得到编码表认可的编码 → 转贪心回退
    #[error("Unseen label for component {slot}")]
    UnseenLabel { slot: ComponentType },

    /// 解码后重算总价超出预算 → 转贪心回退
    #[error("Total price exceeds budget: total={total}, budget={budget}")]
    BudgetExceeded { total: f64, budget: f64 },

    /// 槽位未填满 → 整次尝试作废重试
    #[error("Incomplete build: {filled}/7 slots filled")]
    IncompleteBuild { filled: usize },

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Catalog(#[from] RepositoryError),
}

/// 引擎对外错误
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("无效预算: {0}")]
    InvalidBudget(f64),

    /// 仅在配置了尝试上限时出现
    #[error("无可行配置: budget={budget}, attempts={attempts}")]
    NoFeasibleBuild { budget: f64, attempts: u32 },

    /// 回退路径上的目录访问失败（基础设施故障，不再重试）
    #[error("目录访问失败: {0}")]
    Catalog(#[from] RepositoryError),
}
