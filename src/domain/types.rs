// ==========================================
// 整机配置推荐系统 - 领域类型定义
// ==========================================
// 职责: 部件槽位类型（固定 7 个、固定顺序）
// 红线: 完整配置必须且只能为每个槽位分配一个部件
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 槽位数量
pub const SLOT_COUNT: usize = 7;

// ==========================================
// 部件类型 (Component Type)
// ==========================================
// 序列化格式: 与目录库 type 字段、模型编码表键名一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    #[serde(rename = "PSU")]
    Psu,
    Case,
    Motherboard,
}

/// 槽位固定顺序（输入向量的下标顺序）
pub const SLOT_ORDER: [ComponentType; SLOT_COUNT] = [
    ComponentType::Cpu,
    ComponentType::Gpu,
    ComponentType::Ram,
    ComponentType::Storage,
    ComponentType::Psu,
    ComponentType::Case,
    ComponentType::Motherboard,
];

impl ComponentType {
    /// 目录库/编码表中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Cpu => "CPU",
            ComponentType::Gpu => "GPU",
            ComponentType::Ram => "RAM",
            ComponentType::Storage => "Storage",
            ComponentType::Psu => "PSU",
            ComponentType::Case => "Case",
            ComponentType::Motherboard => "Motherboard",
        }
    }

    /// 在 SLOT_ORDER 中的下标
    pub fn slot_index(&self) -> usize {
        match self {
            ComponentType::Cpu => 0,
            ComponentType::Gpu => 1,
            ComponentType::Ram => 2,
            ComponentType::Storage => 3,
            ComponentType::Psu => 4,
            ComponentType::Case => 5,
            ComponentType::Motherboard => 6,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 未知部件类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未知部件类型: {0}")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SLOT_ORDER
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_order_matches_slot_index() {
        for (i, t) in SLOT_ORDER.iter().enumerate() {
            assert_eq!(t.slot_index(), i);
        }
    }

    #[test]
    fn test_parse_and_display() {
        for t in SLOT_ORDER {
            assert_eq!(t.as_str().parse::<ComponentType>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
        // 大小写敏感，与目录库 type 字段一致
        assert!("cpu".parse::<ComponentType>().is_err());
        assert!("Cooler".parse::<ComponentType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ComponentType::Psu).unwrap();
        assert_eq!(json, "\"PSU\"");
        let t: ComponentType = serde_json::from_str("\"Motherboard\"").unwrap();
        assert_eq!(t, ComponentType::Motherboard);
    }
}
