// ==========================================
// 整机配置推荐系统 - 预测评分器
// ==========================================
// 输入: 7 个槽位编码（SLOT_ORDER 顺序）
// 输出: 历史确认配置的下标
// ==========================================

use crate::domain::types::SLOT_COUNT;

/// 预测评分器 Trait
///
/// 纯函数: 相同输入必须得到相同输出，推荐引擎不观察任何副作用
pub trait BuildScorer: Send + Sync {
    fn predict(&self, input: &[usize; SLOT_COUNT]) -> usize;
}

// ==========================================
// HistoricalMatchScorer - 历史匹配评分器
// ==========================================
// 返回与输入共享编码最多的历史配置下标（并列取最小下标）
#[derive(Debug, Clone, Default)]
pub struct HistoricalMatchScorer {
    history: Vec<[usize; SLOT_COUNT]>,
}

impl HistoricalMatchScorer {
    pub fn new(history: Vec<[usize; SLOT_COUNT]>) -> Self {
        Self { history }
    }
}

impl BuildScorer for HistoricalMatchScorer {
    fn predict(&self, input: &[usize; SLOT_COUNT]) -> usize {
        let mut best_index = 0;
        let mut best_matches = 0;
        for (index, row) in self.history.iter().enumerate() {
            let matches = row.iter().zip(input.iter()).filter(|(a, b)| a == b).count();
            if matches > best_matches {
                best_matches = matches;
                best_index = index;
            }
        }
        best_index
    }
}
