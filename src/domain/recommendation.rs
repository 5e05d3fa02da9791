// ==========================================
// 整机配置推荐系统 - 推荐结果与确认报价
// ==========================================
// 红线: 返回给调用方的推荐必须完整（7 槽位）且总价 ≤ 预算
// 序列化: {"CPU": {...}, ..., "Total Price": 123.0}
// ==========================================

use crate::domain::component::Component;
use crate::domain::types::{ComponentType, SLOT_COUNT};
use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 总价条目的键名
pub const TOTAL_PRICE_KEY: &str = "Total Price";

// ==========================================
// SelectedComponent - 槽位选中部件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedComponent {
    pub name: String,
    pub price: f64,
    pub id: String,
}

impl From<&Component> for SelectedComponent {
    fn from(c: &Component) -> Self {
        Self {
            name: c.name.clone(),
            price: c.price,
            id: c.component_id.clone(),
        }
    }
}

// ==========================================
// Recommendation - 推荐配置
// ==========================================
// BTreeMap 按 ComponentType 的声明顺序排序，即 SLOT_ORDER
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendation {
    slots: BTreeMap<ComponentType, SelectedComponent>,
    total_price: Option<f64>,
}

impl Recommendation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入槽位（同一槽位重复写入时覆盖）
    pub fn insert(&mut self, slot: ComponentType, component: SelectedComponent) {
        self.slots.insert(slot, component);
    }

    pub fn get(&self, slot: ComponentType) -> Option<&SelectedComponent> {
        self.slots.get(&slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&ComponentType, &SelectedComponent)> {
        self.slots.iter()
    }

    /// 已填充的部件条目数（不含总价条目）
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 完整性: 恰好 7 个部件条目
    pub fn is_complete(&self) -> bool {
        self.slots.len() == SLOT_COUNT
    }

    /// 各槽位价格之和
    pub fn slot_price_sum(&self) -> f64 {
        self.slots.values().map(|c| c.price).sum()
    }

    /// 挂载派生的总价条目
    pub fn attach_total(&mut self, total_price: f64) {
        self.total_price = Some(total_price);
    }

    pub fn total_price(&self) -> Option<f64> {
        self.total_price
    }

    /// 未填充的槽位
    pub fn missing_slots(&self) -> Vec<ComponentType> {
        crate::domain::types::SLOT_ORDER
            .iter()
            .copied()
            .filter(|t| !self.slots.contains_key(t))
            .collect()
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.slots.len() + usize::from(self.total_price.is_some());
        let mut map = serializer.serialize_map(Some(entries))?;
        for (slot, component) in &self.slots {
            map.serialize_entry(slot.as_str(), component)?;
        }
        if let Some(total) = self.total_price {
            map.serialize_entry(TOTAL_PRICE_KEY, &total)?;
        }
        map.end()
    }
}

struct RecommendationVisitor;

impl<'de> Visitor<'de> for RecommendationVisitor {
    type Value = Recommendation;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of component type to {name, price, id} with an optional \"Total Price\"")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut recommendation = Recommendation::new();
        while let Some(key) = access.next_key::<String>()? {
            if key == TOTAL_PRICE_KEY {
                recommendation.total_price = Some(access.next_value()?);
                continue;
            }
            let slot: ComponentType = key.parse().map_err(de::Error::custom)?;
            let component: SelectedComponent = access.next_value()?;
            recommendation.slots.insert(slot, component);
        }
        Ok(recommendation)
    }
}

impl<'de> Deserialize<'de> for Recommendation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecommendationVisitor)
    }
}

// ==========================================
// ConfirmedQuote - 已确认报价
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedQuote {
    pub quote_id: String,
    pub components: Recommendation,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SLOT_ORDER;

    fn full_recommendation(price: f64) -> Recommendation {
        let mut rec = Recommendation::new();
        for (i, slot) in SLOT_ORDER.iter().enumerate() {
            rec.insert(
                *slot,
                SelectedComponent {
                    name: format!("{} #{}", slot, i),
                    price,
                    id: format!("{}", 100 + i),
                },
            );
        }
        rec
    }

    #[test]
    fn test_completeness_ignores_total_entry() {
        let mut rec = full_recommendation(10.0);
        assert!(rec.is_complete());
        rec.attach_total(70.0);
        assert_eq!(rec.len(), 7);
        assert!(rec.is_complete());

        let mut partial = Recommendation::new();
        partial.insert(
            ComponentType::Cpu,
            SelectedComponent { name: "x".into(), price: 1.0, id: "1".into() },
        );
        partial.attach_total(1.0);
        assert!(!partial.is_complete());
        assert_eq!(partial.missing_slots().len(), 6);
    }

    #[test]
    fn test_json_shape() {
        let mut rec = full_recommendation(10.0);
        rec.attach_total(rec.slot_price_sum());
        let value = serde_json::to_value(&rec).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert_eq!(obj[TOTAL_PRICE_KEY], serde_json::json!(70.0));
        assert_eq!(obj["CPU"]["id"], serde_json::json!("100"));
        assert_eq!(obj["Motherboard"]["price"], serde_json::json!(10.0));

        let back: Recommendation = serde_json::from_value(value).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_rejects_unknown_slot_key() {
        let raw = r#"{"Cooler": {"name": "x", "price": 1.0, "id": "9"}}"#;
        assert!(serde_json::from_str::<Recommendation>(raw).is_err());
    }
}
