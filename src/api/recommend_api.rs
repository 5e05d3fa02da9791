// ==========================================
// 整机配置推荐系统 - 推荐 API
// ==========================================
// 职责:
// 1. 按预算推荐整机配置
// 2. 确认报价并持久化
// 3. 单部件替换推荐
// ==========================================

use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{parse_component_type, validate_budget};
use crate::domain::recommendation::{Recommendation, SelectedComponent};
use crate::domain::types::ComponentType;
use crate::engine::assembler::BuildAssembler;
use crate::engine::catalog::{ComponentCatalog, QuoteStore};
use crate::engine::greedy::pick_max_within;
use crate::engine::sampler::CandidateSampler;

/// 确认状态
pub const STATUS_CONFIRMED: &str = "confirmed";

// ==========================================
// 响应类型
// ==========================================

/// 确认报价响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    #[serde(rename = "quoteid")]
    pub quote_id: String,
    pub status: String,
}

/// 单部件替换推荐（序列化为 {"GPU": {...}}）
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSuggestion {
    pub component_type: ComponentType,
    pub component: SelectedComponent,
}

impl Serialize for ComponentSuggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.component_type.as_str(), &self.component)?;
        map.end()
    }
}

// ==========================================
// RecommendApi
// ==========================================
pub struct RecommendApi {
    assembler: Arc<BuildAssembler>,
    catalog: Arc<dyn ComponentCatalog>,
    quote_store: Arc<dyn QuoteStore>,
}

impl RecommendApi {
    /// 创建新的 RecommendApi 实例
    ///
    /// # 参数
    /// - assembler: 整机选配引擎
    /// - catalog: 部件目录（单部件替换使用）
    /// - quote_store: 确认报价存储
    pub fn new(
        assembler: Arc<BuildAssembler>,
        catalog: Arc<dyn ComponentCatalog>,
        quote_store: Arc<dyn QuoteStore>,
    ) -> Self {
        Self {
            assembler,
            catalog,
            quote_store,
        }
    }

    /// 按预算推荐整机配置
    ///
    /// # 返回
    /// - Ok(Recommendation): 7 个槽位 + Total Price，总价 ≤ 预算
    /// - Err(ApiError::InvalidInput): 预算无效
    /// - Err(ApiError::NoFeasibleBuild): 配置了尝试上限且未找到可行配置
    pub fn recommend(&self, budget: f64) -> ApiResult<Recommendation> {
        let budget = validate_budget(budget)?;
        debug!("Budget: {}", budget);

        let recommendation = self.assembler.recommend(budget)?;
        Ok(recommendation)
    }

    /// 确认报价
    ///
    /// 持久化恰好一次，返回生成的报价ID
    pub fn confirm(&self, recommendation: &Recommendation) -> ApiResult<ConfirmResponse> {
        if recommendation.is_empty() {
            return Err(ApiError::InvalidInput("确认的配置不能为空".to_string()));
        }

        let quote_id = self.quote_store.persist(recommendation)?;
        info!("报价已确认: quote_id={}, components={}", quote_id, recommendation.len());

        Ok(ConfirmResponse {
            quote_id,
            status: STATUS_CONFIRMED.to_string(),
        })
    }

    /// 单部件替换推荐
    ///
    /// 抽样该类型候选，取价格 ≤ 预算的最高价者
    ///
    /// # 参数
    /// - component_type: 部件类型字符串（如 "GPU"）
    /// - budget: 该部件可用预算
    ///
    /// # 返回
    /// - Err(ApiError::NotFound("No suitable component found")): 抽样中无价格 ≤ 预算的部件
    /// - Err(ApiError::InvalidInput): 类型字符串为空或不是 7 种类型之一
    ///
    /// 说明: 未知类型不按"无合适部件"的 404 处理，而是在抽样前作为输入错误拒绝
    pub fn recommend_component(&self, component_type: &str, budget: f64) -> ApiResult<ComponentSuggestion> {
        let component_type = parse_component_type(component_type)?;
        let budget = validate_budget(budget)?;

        let sampler = CandidateSampler::new(self.catalog.as_ref(), self.assembler.policy().sample_size);
        let candidates = sampler.draw(component_type)?;

        let selected = pick_max_within(&candidates, 0.0, budget)
            .ok_or_else(|| ApiError::NotFound("No suitable component found".to_string()))?;

        Ok(ComponentSuggestion {
            component_type,
            component: SelectedComponent::from(selected),
        })
    }
}
