// ==========================================
// 整机配置推荐系统 - 贪心回退选配
// ==========================================
// 规则: 每个槽位独立重新抽样，在放得进预算的候选中取价格最高者
//       （预算利用最大化，不是最便宜优先）
// 无候选可放入时该槽位留空，完整性由外层判断
// ==========================================

use crate::domain::component::Component;
use crate::domain::recommendation::{Recommendation, SelectedComponent};
use crate::domain::types::SLOT_ORDER;
use crate::engine::catalog::ComponentCatalog;
use crate::engine::sampler::CandidateSampler;
use crate::repository::RepositoryResult;
use tracing::debug;

/// 在候选中取放得进预算的最高价者（并列取抽样顺序靠前者）
pub fn pick_max_within(candidates: &[Component], running_total: f64, budget: f64) -> Option<&Component> {
    let mut best: Option<&Component> = None;
    for c in candidates.iter().filter(|c| c.fits(running_total, budget)) {
        match best {
            Some(b) if c.price <= b.price => {}
            _ => best = Some(c),
        }
    }
    best
}

pub struct GreedyFiller<'a> {
    sampler: CandidateSampler<'a>,
}

impl<'a> GreedyFiller<'a> {
    pub fn new(catalog: &'a dyn ComponentCatalog, sample_size: usize) -> Self {
        Self {
            sampler: CandidateSampler::new(catalog, sample_size),
        }
    }

    /// 执行一次贪心选配（不依赖模型）
    pub fn assemble(&self, budget: f64) -> RepositoryResult<Recommendation> {
        let mut recommendation = Recommendation::new();
        let mut total_price = 0.0;

        for slot in SLOT_ORDER {
            let candidates = self.sampler.draw(slot)?;
            match pick_max_within(&candidates, total_price, budget) {
                Some(selected) => {
                    total_price += selected.price;
                    recommendation.insert(slot, SelectedComponent::from(selected));
                }
                None => {
                    debug!(
                        slot = %slot,
                        sampled = candidates.len(),
                        remaining = budget - total_price,
                        "槽位无可放入候选，本次留空"
                    );
                }
            }
        }

        recommendation.attach_total(total_price);
        debug!(
            filled = recommendation.len(),
            total_price, "贪心回退选配结果"
        );
        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ComponentType;
    use crate::engine::catalog::InMemoryCatalog;

    fn part(id: &str, t: ComponentType, price: f64) -> Component {
        Component {
            component_id: id.to_string(),
            name: id.to_string(),
            manufacturer: None,
            price,
            component_type: t,
        }
    }

    #[test]
    fn test_pick_max_within_budget() {
        let candidates = vec![
            part("a", ComponentType::Gpu, 300.0),
            part("b", ComponentType::Gpu, 900.0),
            part("c", ComponentType::Gpu, 500.0),
        ];
        // 剩余 600: b 放不下，取 c
        let picked = pick_max_within(&candidates, 400.0, 1000.0).unwrap();
        assert_eq!(picked.component_id, "c");

        // 全部放不下
        assert!(pick_max_within(&candidates, 800.0, 1000.0).is_none());
    }

    #[test]
    fn test_pick_ties_and_free_components() {
        let candidates = vec![
            part("first", ComponentType::Case, 0.0),
            part("second", ComponentType::Case, 0.0),
        ];
        let picked = pick_max_within(&candidates, 100.0, 100.0).unwrap();
        assert_eq!(picked.component_id, "first");
    }

    #[test]
    fn test_greedy_fills_all_slots_when_affordable() {
        let mut parts = Vec::new();
        for slot in SLOT_ORDER {
            parts.push(part(&format!("{}-cheap", slot), slot, 10.0));
            parts.push(part(&format!("{}-mid", slot), slot, 50.0));
        }
        let catalog = InMemoryCatalog::with_components(parts);
        let filler = GreedyFiller::new(&catalog, 5);

        let rec = filler.assemble(350.0).unwrap();
        assert!(rec.is_complete());
        assert_eq!(rec.get(ComponentType::Cpu).unwrap().id, "CPU-mid");
        assert_eq!(rec.total_price(), Some(350.0));
    }

    #[test]
    fn test_greedy_leaves_slot_empty_when_nothing_fits() {
        let mut parts = Vec::new();
        for slot in SLOT_ORDER {
            let price = if slot == ComponentType::Motherboard { 500.0 } else { 10.0 };
            parts.push(part(&format!("{}-0", slot), slot, price));
        }
        let catalog = InMemoryCatalog::with_components(parts);
        let filler = GreedyFiller::new(&catalog, 5);

        let rec = filler.assemble(100.0).unwrap();
        assert_eq!(rec.len(), 6);
        assert!(!rec.is_complete());
        assert_eq!(rec.missing_slots(), vec![ComponentType::Motherboard]);
        assert!(rec.slot_price_sum() <= 100.0);
    }
}
