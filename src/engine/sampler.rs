// ==========================================
// 整机配置推荐系统 - 候选抽样器
// ==========================================
// 职责: 按槽位抽取少量随机候选并解析价格/名称
// 约束: 每次尝试重新抽样，不跨尝试去重；除目录读取外无副作用
// ==========================================

use crate::domain::component::Component;
use crate::domain::types::ComponentType;
use crate::engine::catalog::ComponentCatalog;
use crate::repository::RepositoryResult;
use tracing::{debug, warn};

/// 默认抽样宽度
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

pub struct CandidateSampler<'a> {
    catalog: &'a dyn ComponentCatalog,
    sample_size: usize,
}

impl<'a> CandidateSampler<'a> {
    pub fn new(catalog: &'a dyn ComponentCatalog, sample_size: usize) -> Self {
        Self {
            catalog,
            sample_size,
        }
    }

    /// 抽取候选ID（未解析）
    pub fn sample_ids(&self, slot: ComponentType) -> RepositoryResult<Vec<String>> {
        let ids = self.catalog.sample_candidates(slot, self.sample_size)?;
        debug!(slot = %slot, sampled = ids.len(), "候选抽样");
        Ok(ids)
    }

    /// 解析单个候选
    ///
    /// 目录中不存在或类型与槽位不符时返回 None
    pub fn resolve(&self, slot: ComponentType, component_id: &str) -> RepositoryResult<Option<Component>> {
        match self.catalog.lookup(component_id)? {
            Some(c) if c.component_type == slot => Ok(Some(c)),
            Some(c) => {
                warn!(
                    "候选类型不符: component_id={}, expected={}, actual={}",
                    component_id, slot, c.component_type
                );
                Ok(None)
            }
            None => {
                debug!("候选在目录中不存在: component_id={}", component_id);
                Ok(None)
            }
        }
    }

    /// 抽样并解析全部候选（保持抽样顺序）
    pub fn draw(&self, slot: ComponentType) -> RepositoryResult<Vec<Component>> {
        let mut candidates = Vec::with_capacity(self.sample_size);
        for id in self.sample_ids(slot)? {
            if let Some(c) = self.resolve(slot, &id)? {
                candidates.push(c);
            }
        }
        Ok(candidates)
    }
}
