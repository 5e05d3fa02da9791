// ==========================================
// 整机配置推荐系统 - 重试策略
// ==========================================
// 默认不设尝试上限（预算低于某类最低价时永不终止）
// 设置 max_attempts 后，超限返回 NoFeasibleBuild
// ==========================================

use crate::engine::sampler::DEFAULT_SAMPLE_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// 最大尝试次数（None = 不限）
    pub max_attempts: Option<u32>,
    /// 每槽位抽样宽度
    pub sample_size: usize,
}

impl RetryPolicy {
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..Self::unbounded()
        }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// 尝试计数加一（不限次数时计数在 u32::MAX 处饱和）
    pub fn next_attempt(&self, attempts: u32) -> u32 {
        attempts.saturating_add(1)
    }

    /// 已完成 `attempts` 次尝试后是否允许继续
    pub fn allows_another(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max,
            None => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}
