// ==========================================
// 整机配置推荐系统 - 槽位编码表
// ==========================================
// 语义: 标签编码（词汇按字典序排序，编码 = 排序后的下标）
// 红线: 编码表训练后固定，推荐引擎只读
// ==========================================

use crate::domain::types::ComponentType;
use crate::model::error::{ArtifactError, EncodingError};

// ==========================================
// EncodingTable - 单槽位编码表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingTable {
    slot: ComponentType,
    classes: Vec<String>,
}

impl EncodingTable {
    /// 由部件ID集合构建编码表（排序 + 去重）
    pub fn fit<I, S>(slot: ComponentType, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = ids.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { slot, classes }
    }

    /// 由已排序的词汇表构建（模型文件加载路径）
    ///
    /// 词汇必须严格递增，否则编码与训练期不一致
    pub fn from_classes(slot: ComponentType, classes: Vec<String>) -> Result<Self, ArtifactError> {
        if classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ArtifactError::InvalidVocabulary(slot));
        }
        Ok(Self { slot, classes })
    }

    pub fn slot(&self) -> ComponentType {
        self.slot
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// 部件ID → 编码
    pub fn encode(&self, id: &str) -> Result<usize, EncodingError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(id))
            .map_err(|_| EncodingError::UnknownIdentifier {
                slot: self.slot,
                id: id.to_string(),
            })
    }

    /// 编码 → 部件ID
    pub fn decode(&self, code: usize) -> Result<&str, EncodingError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(EncodingError::CodeOutOfRange {
                slot: self.slot,
                code,
                table_size: self.classes.len(),
            })
    }

    pub fn contains_code(&self, code: usize) -> bool {
        code < self.classes.len()
    }
}
