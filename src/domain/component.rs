// ==========================================
// 整机配置推荐系统 - 部件实体
// ==========================================
// 依据: components 表（目录库）
// 红线: 部件对推荐引擎只读
// ==========================================

use crate::domain::types::ComponentType;
use serde::{Deserialize, Serialize};

// ==========================================
// Component - 目录部件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub component_id: String,     // 部件ID（编码表按字符串匹配）
    pub name: String,             // 展示名称
    pub manufacturer: Option<String>,
    pub price: f64,               // 价格（非负）
    pub component_type: ComponentType,
}

impl Component {
    /// 在当前累计总价上加入本部件后是否仍在预算内
    pub fn fits(&self, running_total: f64, budget: f64) -> bool {
        running_total + self.price <= budget
    }
}
