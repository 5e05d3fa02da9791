// ==========================================
// 整机配置推荐系统 - 模型产物
// ==========================================
// 职责: 加载离线训练产出的模型文件（编码表 + 历史配置）
// 约束: 进程启动时加载一次，之后以 Arc 只读共享，不加锁
// ==========================================

use crate::domain::types::{ComponentType, SLOT_COUNT, SLOT_ORDER};
use crate::model::encoding::EncodingTable;
use crate::model::error::ArtifactError;
use crate::model::scorer::{BuildScorer, HistoricalMatchScorer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ==========================================
// ArtifactFile - 模型文件格式
// ==========================================
/// 模型文件 JSON 结构
///
/// ```json
/// {
///   "version": "2024-06-01",
///   "encoders": { "CPU": ["1", "2"], "GPU": ["10"], ... },
///   "history": [[0, 0, 0, 0, 0, 0, 0], ...]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub version: String,
    pub encoders: BTreeMap<ComponentType, Vec<String>>,
    pub history: Vec<[usize; SLOT_COUNT]>,
}

impl ArtifactFile {
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

// ==========================================
// ModelArtifact - 已加载的模型
// ==========================================
pub struct ModelArtifact {
    version: String,
    // 按 SLOT_ORDER 下标存放
    tables: Vec<EncodingTable>,
    scorer: Box<dyn BuildScorer>,
}

impl std::fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("version", &self.version)
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}

impl ModelArtifact {
    /// 由编码表与评分器组装
    ///
    /// 编码表必须覆盖全部 7 个槽位
    pub fn new(
        version: impl Into<String>,
        tables: Vec<EncodingTable>,
        scorer: Box<dyn BuildScorer>,
    ) -> Result<Self, ArtifactError> {
        let mut by_slot: BTreeMap<ComponentType, EncodingTable> =
            tables.into_iter().map(|t| (t.slot(), t)).collect();

        let mut ordered = Vec::with_capacity(SLOT_COUNT);
        for slot in SLOT_ORDER {
            let table = by_slot.remove(&slot).ok_or(ArtifactError::MissingSlot(slot))?;
            ordered.push(table);
        }

        Ok(Self {
            version: version.into(),
            tables: ordered,
            scorer,
        })
    }

    /// 从模型文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        tracing::info!("加载模型文件: {}", path.display());
        let file = ArtifactFile::read_from(path)?;
        Self::from_file(file)
    }

    /// 由文件结构构建，校验历史配置编码不越界
    pub fn from_file(file: ArtifactFile) -> Result<Self, ArtifactError> {
        let ArtifactFile {
            version,
            mut encoders,
            history,
        } = file;

        let mut tables = Vec::with_capacity(SLOT_COUNT);
        for slot in SLOT_ORDER {
            let classes = encoders.remove(&slot).ok_or(ArtifactError::MissingSlot(slot))?;
            tables.push(EncodingTable::from_classes(slot, classes)?);
        }

        for (row, codes) in history.iter().enumerate() {
            for (slot, code) in SLOT_ORDER.iter().zip(codes.iter()) {
                if !tables[slot.slot_index()].contains_code(*code) {
                    return Err(ArtifactError::HistoryCodeOutOfRange {
                        row,
                        slot: *slot,
                        code: *code,
                    });
                }
            }
        }

        tracing::debug!(
            "模型加载完成: version={}, history_rows={}",
            version,
            history.len()
        );

        Self::new(version, tables, Box::new(HistoricalMatchScorer::new(history)))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// 指定槽位的编码表
    pub fn table(&self, slot: ComponentType) -> &EncodingTable {
        &self.tables[slot.slot_index()]
    }

    pub fn scorer(&self) -> &dyn BuildScorer {
        self.scorer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> ArtifactFile {
        let mut encoders = BTreeMap::new();
        for slot in SLOT_ORDER {
            encoders.insert(slot, vec![format!("{}-a", slot), format!("{}-b", slot)]);
        }
        ArtifactFile {
            version: "test".to_string(),
            encoders,
            history: vec![[0; 7], [1; 7]],
        }
    }

    #[test]
    fn test_from_file_orders_tables_by_slot() {
        let artifact = ModelArtifact::from_file(sample_file()).unwrap();
        for slot in SLOT_ORDER {
            assert_eq!(artifact.table(slot).slot(), slot);
        }
        assert_eq!(artifact.scorer().predict(&[1; 7]), 1);
    }

    #[test]
    fn test_missing_slot_is_rejected() {
        let mut file = sample_file();
        file.encoders.remove(&ComponentType::Psu);
        assert!(matches!(
            ModelArtifact::from_file(file),
            Err(ArtifactError::MissingSlot(ComponentType::Psu))
        ));
    }

    #[test]
    fn test_history_out_of_range_is_rejected() {
        let mut file = sample_file();
        file.history.push([0, 0, 0, 2, 0, 0, 0]);
        match ModelArtifact::from_file(file) {
            Err(ArtifactError::HistoryCodeOutOfRange { row, slot, code }) => {
                assert_eq!(row, 2);
                assert_eq!(slot, ComponentType::Storage);
                assert_eq!(code, 2);
            }
            other => panic!("Expected HistoryCodeOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        sample_file().write_to(&path).unwrap();

        let artifact = ModelArtifact::load(&path).unwrap();
        assert_eq!(artifact.version(), "test");
        assert_eq!(artifact.table(ComponentType::Cpu).len(), 2);
    }
}
