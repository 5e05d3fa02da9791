// ==========================================
// 整机配置推荐系统 - 模型引导选配（主路径）
// ==========================================
// 流程:
// 1) 逐槽位抽样，按抽样顺序取第一个“放得进预算且编码表认识”的候选
// 2) 组装输入向量并校验（未解析 → UnseenLabel）
// 3) 调用评分器；预测下标仅记录日志，不用于取历史配置
// 4) 由已选编码解码回部件ID，重新查价并重算总价
// 5) 总价超预算 → BudgetExceeded；不足 7 槽位时原样返回（由外层重试）
// ==========================================

use crate::domain::recommendation::{Recommendation, SelectedComponent};
use crate::domain::types::SLOT_ORDER;
use crate::engine::catalog::ComponentCatalog;
use crate::engine::error::AttemptError;
use crate::engine::input_vector::InputVector;
use crate::engine::sampler::CandidateSampler;
use crate::model::artifact::ModelArtifact;
use tracing::{debug, error};

pub struct ModelGuidedSelector<'a> {
    sampler: CandidateSampler<'a>,
    artifact: &'a ModelArtifact,
}

impl<'a> ModelGuidedSelector<'a> {
    pub fn new(catalog: &'a dyn ComponentCatalog, artifact: &'a ModelArtifact, sample_size: usize) -> Self {
        Self {
            sampler: CandidateSampler::new(catalog, sample_size),
            artifact,
        }
    }

    /// 执行一次模型引导选配
    ///
    /// # 返回
    /// - Ok(Recommendation): 总价在预算内（可能不完整）
    /// - Err(UnseenLabel / BudgetExceeded / ...): 由调用方转入贪心回退
    pub fn assemble(&self, budget: f64) -> Result<Recommendation, AttemptError> {
        let input = self.choose_codes(budget)?;
        let codes = input.resolve(self.artifact)?;

        let predicted_index = self.artifact.scorer().predict(&codes);
        debug!(
            predicted_index,
            model_version = self.artifact.version(),
            "评分器预测完成（预测下标不参与配置重建）"
        );

        let mut recommendation = Recommendation::new();
        let mut total_price = 0.0;
        for slot in SLOT_ORDER {
            let component_id = self.artifact.table(slot).decode(codes[slot.slot_index()])?;
            if let Some(component) = self.sampler.resolve(slot, component_id)? {
                total_price += component.price;
                recommendation.insert(slot, SelectedComponent::from(&component));
            }
        }

        if total_price > budget {
            return Err(AttemptError::BudgetExceeded {
                total: total_price,
                budget,
            });
        }

        recommendation.attach_total(total_price);
        debug!(
            filled = recommendation.len(),
            total_price, "模型引导选配结果"
        );
        Ok(recommendation)
    }

    /// 第 1 步: 逐槽位首个可行候选
    fn choose_codes(&self, budget: f64) -> Result<InputVector, AttemptError> {
        let mut input = InputVector::unresolved();
        let mut running_total = 0.0;

        for slot in SLOT_ORDER {
            let table = self.artifact.table(slot);
            for component_id in self.sampler.sample_ids(slot)? {
                let Some(component) = self.sampler.resolve(slot, &component_id)? else {
                    continue;
                };
                if !component.fits(running_total, budget) {
                    continue;
                }
                match table.encode(&component.component_id) {
                    Ok(code) => {
                        input.set(slot, code);
                        running_total += component.price;
                        break;
                    }
                    Err(e) => {
                        // 编码表不认识的候选跳过，继续同一槽位的下一个
                        error!("{}", e);
                    }
                }
            }
        }

        Ok(input)
    }
}
