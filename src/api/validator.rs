// ==========================================
// 整机配置推荐系统 - 请求参数校验
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::ComponentType;

/// 校验预算: 有限且大于 0
pub fn validate_budget(budget: f64) -> ApiResult<f64> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(ApiError::InvalidInput(format!("预算必须为正数: {}", budget)));
    }
    Ok(budget)
}

/// 解析部件类型（与目录库 type 字段一致，大小写敏感）
pub fn parse_component_type(raw: &str) -> ApiResult<ComponentType> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("Component type is required".to_string()));
    }
    trimmed
        .parse()
        .map_err(|e: crate::domain::types::UnknownComponentType| ApiError::InvalidInput(e.to_string()))
}
