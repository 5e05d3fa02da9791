// ==========================================
// 整机配置推荐系统 - 整机选配编排引擎
// ==========================================
// 状态机: Attempting → Done
// - 每次尝试先走模型引导主路径
// - 主路径出错 → 本次尝试改走贪心回退
// - 结果恰好 7 个槽位 → Done；否则整次尝试作废，重新抽样
// 红线: 只返回完整且总价 ≤ 预算的配置
// ==========================================

use crate::domain::recommendation::Recommendation;
use crate::engine::catalog::ComponentCatalog;
use crate::engine::error::{AssemblyError, AttemptError};
use crate::engine::greedy::GreedyFiller;
use crate::engine::model_guided::ModelGuidedSelector;
use crate::engine::retry::RetryPolicy;
use crate::model::artifact::ModelArtifact;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// 产出结果的路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionPath {
    ModelGuided, // 模型引导
    Greedy,      // 贪心回退
}

/// 选配结果（附带诊断信息）
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub recommendation: Recommendation,
    pub attempts: u32,
    pub path: SelectionPath,
}

enum AssemblyState {
    Attempting { attempts: u32 },
    Done(AssemblyReport),
}

// ==========================================
// BuildAssembler
// ==========================================
pub struct BuildAssembler {
    catalog: Arc<dyn ComponentCatalog>,
    artifact: Arc<ModelArtifact>,
    policy: RetryPolicy,
}

impl BuildAssembler {
    pub fn new(
        catalog: Arc<dyn ComponentCatalog>,
        artifact: Arc<ModelArtifact>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            catalog,
            artifact,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// 按预算生成完整配置
    pub fn recommend(&self, budget: f64) -> Result<Recommendation, AssemblyError> {
        self.assemble(budget).map(|report| report.recommendation)
    }

    /// 按预算生成完整配置（带尝试次数与路径）
    ///
    /// 未设置尝试上限且预算不可满足时不会返回
    #[instrument(skip(self), fields(max_attempts = ?self.policy.max_attempts))]
    pub fn assemble(&self, budget: f64) -> Result<AssemblyReport, AssemblyError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(AssemblyError::InvalidBudget(budget));
        }

        let mut state = AssemblyState::Attempting { attempts: 0 };
        loop {
            state = match state {
                AssemblyState::Done(report) => {
                    info!(
                        attempts = report.attempts,
                        path = ?report.path,
                        total_price = report.recommendation.slot_price_sum(),
                        "整机配置生成完成"
                    );
                    return Ok(report);
                }
                AssemblyState::Attempting { attempts } => {
                    if !self.policy.allows_another(attempts) {
                        warn!(attempts, "达到尝试上限，未找到可行配置");
                        return Err(AssemblyError::NoFeasibleBuild { budget, attempts });
                    }
                    let attempts = self.policy.next_attempt(attempts);
                    match self.run_attempt(budget) {
                        Ok((recommendation, path)) => AssemblyState::Done(AssemblyReport {
                            recommendation,
                            attempts,
                            path,
                        }),
                        Err(AttemptError::Catalog(e)) => return Err(AssemblyError::Catalog(e)),
                        Err(e) => {
                            debug!(attempt = attempts, "本次尝试作废: {}", e);
                            AssemblyState::Attempting { attempts }
                        }
                    }
                }
            };
        }
    }

    /// 单次尝试: 主路径，失败则贪心回退
    fn run_attempt(&self, budget: f64) -> Result<(Recommendation, SelectionPath), AttemptError> {
        let sample_size = self.policy.sample_size;
        let primary = ModelGuidedSelector::new(self.catalog.as_ref(), &self.artifact, sample_size);

        let (recommendation, path) = match primary.assemble(budget) {
            Ok(rec) => (rec, SelectionPath::ModelGuided),
            Err(e) => {
                warn!("模型引导选配失败，转贪心回退: {}", e);
                let fallback = GreedyFiller::new(self.catalog.as_ref(), sample_size);
                (fallback.assemble(budget)?, SelectionPath::Greedy)
            }
        };

        if !recommendation.is_complete() {
            debug!(path = ?path, missing = ?recommendation.missing_slots(), "配置不完整");
            return Err(AttemptError::IncompleteBuild {
                filled: recommendation.len(),
            });
        }

        let total = recommendation.slot_price_sum();
        if total > budget {
            return Err(AttemptError::BudgetExceeded { total, budget });
        }

        Ok((recommendation, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::Component;
    use crate::domain::types::{ComponentType, SLOT_ORDER};
    use crate::engine::catalog::InMemoryCatalog;
    use crate::model::{EncodingTable, HistoricalMatchScorer};
    use crate::repository::{RepositoryError, RepositoryResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn part(id: &str, t: ComponentType, price: f64) -> Component {
        Component {
            component_id: id.to_string(),
            name: id.to_string(),
            manufacturer: None,
            price,
            component_type: t,
        }
    }

    fn catalog_with(per_slot: usize, price: f64) -> InMemoryCatalog {
        let mut parts = Vec::new();
        for slot in SLOT_ORDER {
            for i in 0..per_slot {
                parts.push(part(&format!("{}-{}", slot, i), slot, price));
            }
        }
        InMemoryCatalog::with_components(parts)
    }

    fn artifact_for(per_slot: usize) -> Arc<ModelArtifact> {
        let tables = SLOT_ORDER
            .iter()
            .map(|s| EncodingTable::fit(*s, (0..per_slot).map(|i| format!("{}-{}", s, i))))
            .collect();
        Arc::new(ModelArtifact::new("t", tables, Box::new(HistoricalMatchScorer::default())).unwrap())
    }

    /// 第二次及以后的 lookup 价格翻倍（模拟选择与重算之间的价格变动）
    struct DriftingCatalog {
        inner: InMemoryCatalog,
        lookups: AtomicUsize,
    }

    impl ComponentCatalog for DriftingCatalog {
        fn sample_candidates(&self, t: ComponentType, count: usize) -> RepositoryResult<Vec<String>> {
            self.inner.sample_candidates(t, count)
        }

        fn lookup(&self, id: &str) -> RepositoryResult<Option<Component>> {
            let n = self.lookups.fetch_add(1, Ordering::SeqCst);
            let mut c = self.inner.lookup(id)?;
            // 主路径前 7 次为选择阶段
            if (7..14).contains(&n) {
                if let Some(c) = c.as_mut() {
                    c.price *= 2.0;
                }
            }
            Ok(c)
        }
    }

    #[derive(Clone, Copy)]
    enum LookupFault {
        Outage,
        Missing,
    }

    /// 第 fault_at 次 lookup 出故障，其余透传
    struct FaultyLookupCatalog {
        inner: InMemoryCatalog,
        lookups: AtomicUsize,
        fault_at: usize,
        fault: LookupFault,
    }

    impl ComponentCatalog for FaultyLookupCatalog {
        fn sample_candidates(&self, t: ComponentType, count: usize) -> RepositoryResult<Vec<String>> {
            self.inner.sample_candidates(t, count)
        }

        fn lookup(&self, id: &str) -> RepositoryResult<Option<Component>> {
            let n = self.lookups.fetch_add(1, Ordering::SeqCst);
            if n != self.fault_at {
                return self.inner.lookup(id);
            }
            match self.fault {
                LookupFault::Outage => Err(RepositoryError::DatabaseConnectionError("blip".to_string())),
                LookupFault::Missing => Ok(None),
            }
        }
    }

    struct BrokenCatalog;

    impl ComponentCatalog for BrokenCatalog {
        fn sample_candidates(&self, _: ComponentType, _: usize) -> RepositoryResult<Vec<String>> {
            Err(RepositoryError::DatabaseConnectionError("down".to_string()))
        }

        fn lookup(&self, _: &str) -> RepositoryResult<Option<Component>> {
            Err(RepositoryError::DatabaseConnectionError("down".to_string()))
        }
    }

    #[test]
    fn test_primary_path_completes_first_attempt() {
        let assembler = BuildAssembler::new(
            Arc::new(catalog_with(5, 50_000.0)),
            artifact_for(5),
            RetryPolicy::default(),
        );
        let report = assembler.assemble(500_000.0).unwrap();
        assert_eq!(report.attempts, 1);
        assert_eq!(report.path, SelectionPath::ModelGuided);
        assert!(report.recommendation.is_complete());
        assert!(report.recommendation.slot_price_sum() <= 500_000.0);
    }

    #[test]
    fn test_unknown_vocabulary_routes_to_greedy() {
        // 编码表完全不认识目录中的部件
        let assembler = BuildAssembler::new(
            Arc::new(catalog_with(5, 100.0)),
            Arc::new(
                ModelArtifact::new(
                    "t",
                    SLOT_ORDER.iter().map(|s| EncodingTable::fit(*s, ["unknown"])).collect(),
                    Box::new(HistoricalMatchScorer::default()),
                )
                .unwrap(),
            ),
            RetryPolicy::default(),
        );
        let report = assembler.assemble(1_000.0).unwrap();
        assert_eq!(report.path, SelectionPath::Greedy);
        assert_eq!(report.attempts, 1);
        assert_eq!(report.recommendation.total_price(), Some(700.0));
    }

    #[test]
    fn test_budget_exceeded_after_decode_routes_to_greedy() {
        let catalog = DriftingCatalog {
            inner: catalog_with(1, 100.0),
            lookups: AtomicUsize::new(0),
        };
        let assembler = BuildAssembler::new(Arc::new(catalog), artifact_for(1), RetryPolicy::default());

        let report = assembler.assemble(700.0).unwrap();
        assert_eq!(report.path, SelectionPath::Greedy);
        assert!(report.recommendation.slot_price_sum() <= 700.0);
    }

    #[test]
    fn test_catalog_error_during_primary_routes_to_greedy() {
        // 第 4 次 lookup 落在主路径选择阶段（STORAGE 槽位）
        let catalog = FaultyLookupCatalog {
            inner: catalog_with(1, 100.0),
            lookups: AtomicUsize::new(0),
            fault_at: 3,
            fault: LookupFault::Outage,
        };
        let assembler = BuildAssembler::new(Arc::new(catalog), artifact_for(1), RetryPolicy::default());

        let report = assembler.assemble(1_000.0).unwrap();
        assert_eq!(report.path, SelectionPath::Greedy);
        assert_eq!(report.attempts, 1);
        assert!(report.recommendation.is_complete());
        assert_eq!(report.recommendation.total_price(), Some(700.0));
    }

    #[test]
    fn test_lookup_miss_after_decode_retries_without_fallback() {
        // 前 7 次 lookup 为选择阶段；第 8 次是 CPU 解码后的重新查价
        let catalog = FaultyLookupCatalog {
            inner: catalog_with(1, 100.0),
            lookups: AtomicUsize::new(0),
            fault_at: 7,
            fault: LookupFault::Missing,
        };
        let assembler = BuildAssembler::new(Arc::new(catalog), artifact_for(1), RetryPolicy::default());

        let report = assembler.assemble(1_000.0).unwrap();
        assert_eq!(report.attempts, 2);
        assert_eq!(report.path, SelectionPath::ModelGuided);
        assert!(report.recommendation.is_complete());
        assert_eq!(report.recommendation.total_price(), Some(700.0));
    }

    #[test]
    fn test_infeasible_budget_hits_attempt_ceiling() {
        let assembler = BuildAssembler::new(
            Arc::new(catalog_with(5, 100.0)),
            artifact_for(5),
            RetryPolicy::bounded(25),
        );
        match assembler.assemble(99.0) {
            Err(AssemblyError::NoFeasibleBuild { attempts, budget }) => {
                assert_eq!(attempts, 25);
                assert_eq!(budget, 99.0);
            }
            other => panic!("Expected NoFeasibleBuild, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_budget() {
        let assembler = BuildAssembler::new(
            Arc::new(catalog_with(1, 1.0)),
            artifact_for(1),
            RetryPolicy::default(),
        );
        assert!(matches!(assembler.assemble(-1.0), Err(AssemblyError::InvalidBudget(_))));
        assert!(matches!(assembler.assemble(f64::NAN), Err(AssemblyError::InvalidBudget(_))));
    }

    #[test]
    fn test_catalog_outage_is_surfaced() {
        let assembler = BuildAssembler::new(Arc::new(BrokenCatalog), artifact_for(1), RetryPolicy::default());
        assert!(matches!(assembler.assemble(1_000.0), Err(AssemblyError::Catalog(_))));
    }
}
