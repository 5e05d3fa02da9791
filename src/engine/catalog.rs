// ==========================================
// 整机配置推荐系统 - 引擎层外部协作接口
// ==========================================
// 职责: 定义目录访问 / 报价持久化 trait，实现依赖倒置
// 说明: Engine 层定义 trait，Repository 层提供 SQLite 实现
// ==========================================

use crate::domain::component::Component;
use crate::domain::recommendation::Recommendation;
use crate::domain::types::ComponentType;
use crate::repository::{ComponentRepository, ConfirmedQuoteRepository, RepositoryResult};

// ==========================================
// 目录访问 Trait
// ==========================================

/// 部件目录访问
///
/// - `sample_candidates`: 按类型随机抽样，无序，可能少于 count
/// - `lookup`: 按ID解析名称/价格/类型
pub trait ComponentCatalog: Send + Sync {
    fn sample_candidates(
        &self,
        component_type: ComponentType,
        count: usize,
    ) -> RepositoryResult<Vec<String>>;

    fn lookup(&self, component_id: &str) -> RepositoryResult<Option<Component>>;
}

/// 确认报价持久化（只追加）
pub trait QuoteStore: Send + Sync {
    /// 持久化推荐结果，返回生成的报价ID
    fn persist(&self, recommendation: &Recommendation) -> RepositoryResult<String>;
}

impl ComponentCatalog for ComponentRepository {
    fn sample_candidates(
        &self,
        component_type: ComponentType,
        count: usize,
    ) -> RepositoryResult<Vec<String>> {
        self.sample_ids_by_type(component_type, count)
    }

    fn lookup(&self, component_id: &str) -> RepositoryResult<Option<Component>> {
        self.find_by_id(component_id)
    }
}

impl QuoteStore for ConfirmedQuoteRepository {
    fn persist(&self, recommendation: &Recommendation) -> RepositoryResult<String> {
        self.insert(recommendation)
    }
}

#[cfg(test)]
pub use in_memory::InMemoryCatalog;
