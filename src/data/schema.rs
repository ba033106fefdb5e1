use bevy::asset::Asset;
use bevy::prelude::Resource;
use bevy::reflect::TypePath;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

/// 物品上挂的一条命名属性（数值 + 文本）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: f32,
    #[serde(default)]
    pub text: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: f32, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            text: text.into(),
        }
    }
}

/// 物品：既是静态模板，也是背包里的运行时实例
///
/// `properties` 只能通过方法修改，保证 `property_index` 始终与之同步。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawItem")]
pub struct Item {
    pub name: String,
    pub stackable: bool,
    /// 可堆叠时等于 name，否则为 uuid
    pub identity: String,
    pub amount: i32,
    properties: Vec<Property>,
    #[serde(skip)]
    property_index: HashMap<String, usize>,
}

/// 反序列化的中间形态，落地后立刻重建属性索引
#[derive(Deserialize)]
struct RawItem {
    name: String,
    #[serde(default)]
    stackable: bool,
    #[serde(default)]
    identity: String,
    #[serde(default)]
    amount: i32,
    #[serde(default)]
    properties: Vec<Property>,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        let mut item = Item {
            name: raw.name,
            stackable: raw.stackable,
            identity: raw.identity,
            amount: raw.amount,
            properties: raw.properties,
            property_index: HashMap::new(),
        };
        item.rebuild_property_index();
        item
    }
}

impl Item {
    pub fn new(name: impl Into<String>, stackable: bool) -> Self {
        Self {
            name: name.into(),
            stackable,
            ..Default::default()
        }
    }

    /// 链式追加属性，方便写模板
    pub fn with_property(mut self, property: Property) -> Self {
        self.push_property(property);
        self
    }

    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.property_index
            .get(name)
            .and_then(|&i| self.properties.get(i))
    }

    /// 文本属性，不存在时返回空串
    pub fn property_text(&self, name: &str) -> &str {
        self.property(name).map_or("", |p| p.text.as_str())
    }

    /// 数值属性，不存在时返回 0
    pub fn property_value(&self, name: &str) -> f32 {
        self.property(name).map_or(0.0, |p| p.value)
    }

    pub fn set_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties;
        self.rebuild_property_index();
    }

    pub fn push_property(&mut self, property: Property) {
        self.properties.push(property);
        self.rebuild_property_index();
    }

    /// 删除第一个同名属性并返回它
    pub fn remove_property(&mut self, name: &str) -> Option<Property> {
        let pos = self.properties.iter().position(|p| p.name == name)?;
        let removed = self.properties.remove(pos);
        self.rebuild_property_index();
        Some(removed)
    }

    // 同名属性以第一条为准
    pub(crate) fn rebuild_property_index(&mut self) {
        self.property_index.clear();
        for (i, p) in self.properties.iter().enumerate() {
            self.property_index.entry(p.name.clone()).or_insert(i);
        }
    }
}

/// 静态物品表（RON 资产）
#[derive(Asset, Resource, TypePath, Deserialize, Debug, Clone, Default)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}
