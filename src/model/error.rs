// ==========================================
// 整机配置推荐系统 - 模型层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::ComponentType;
use thiserror::Error;

/// 编码/解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("编码表未收录的部件ID: slot={slot}, id={id}")]
    UnknownIdentifier { slot: ComponentType, id: String },

    #[error("编码越界: slot={slot}, code={code}, table_size={table_size}")]
    CodeOutOfRange {
        slot: ComponentType,
        code: usize,
        table_size: usize,
    },
}

/// 模型产物加载错误
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("模型文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("模型文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("模型缺少槽位编码表: {0}")]
    MissingSlot(ComponentType),

    #[error("编码表词汇未排序或存在重复: slot={0}")]
    InvalidVocabulary(ComponentType),

    #[error("历史配置编码越界: row={row}, slot={slot}, code={code}")]
    HistoryCodeOutOfRange {
        row: usize,
        slot: ComponentType,
        code: usize,
    },
}
