// ==========================================
// 整机配置推荐系统 - 模型输入向量
// ==========================================
// 每个槽位显式 Option: None = 未解析，Some(0) 是合法编码
// ==========================================

use crate::domain::types::{ComponentType, SLOT_COUNT, SLOT_ORDER};
use crate::engine::error::AttemptError;
use crate::model::artifact::ModelArtifact;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputVector {
    codes: [Option<usize>; SLOT_COUNT],
}

impl InputVector {
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: ComponentType, code: usize) {
        self.codes[slot.slot_index()] = Some(code);
    }

    pub fn get(&self, slot: ComponentType) -> Option<usize> {
        self.codes[slot.slot_index()]
    }

    /// 校验并展开为评分器输入
    ///
    /// 任一槽位未解析或编码不在该槽位编码表内 → UnseenLabel
    pub fn resolve(&self, artifact: &ModelArtifact) -> Result<[usize; SLOT_COUNT], AttemptError> {
        let mut dense = [0usize; SLOT_COUNT];
        for slot in SLOT_ORDER {
            match self.get(slot) {
                Some(code) if artifact.table(slot).contains_code(code) => {
                    dense[slot.slot_index()] = code;
                }
                _ => return Err(AttemptError::UnseenLabel { slot }),
            }
        }
        Ok(dense)
    }
}
