use bevy::prelude::*;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::display::{DisplayRow, InventoryView};
use crate::data::schema::Item;

/// 原版默认容量
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("背包中没有身份为 {0} 的物品")]
    UnknownIdentity(String),
}

/// 玩家背包（挂在 Resource）
///
/// `items` 保持插入顺序用于显示，`index` 记录 identity → 下标，
/// 两者只在本类型的方法里一起修改。
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SavedInventory")]
pub struct Inventory {
    capacity: usize,
    items: Vec<Item>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct SavedInventory {
    capacity: usize,
    items: Vec<Item>,
}

impl From<SavedInventory> for Inventory {
    fn from(saved: SavedInventory) -> Self {
        let mut inventory = Inventory {
            capacity: saved.capacity,
            items: saved.items,
            index: HashMap::new(),
        };
        inventory.reindex_from(0);
        inventory
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Inventory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// 放入物品，背包满且无法堆叠时返回 false。
    ///
    /// 堆叠到已有条目不受容量限制，数量在 `i32::MAX` 处封顶。
    pub fn add(&mut self, mut item: Item) -> bool {
        if item.amount == 0 {
            item.amount = 1;
        }

        if item.stackable {
            item.identity = item.name.clone();
            if let Some(&i) = self.index.get(&item.identity) {
                let entry = &mut self.items[i];
                entry.amount = entry.amount.saturating_add(item.amount);
                return true;
            }
        } else {
            if item.identity.is_empty() {
                item.regenerate_identity();
            }
            if self.index.contains_key(&item.identity) {
                warn!("身份重复，拒绝放入: {} ({})", item.name, item.identity);
                return false;
            }
        }

        if self.is_full() {
            return false;
        }
        self.insert_entry(item);
        true
    }

    /// 复制模板后放入，背包里的条目与调用方不共享任何数据
    pub fn add_clone(&mut self, template: &Item) -> bool {
        self.add(template.instantiate())
    }

    /// 扣除数量并返回剩余值；剩余 ≤ 0 时整条删除（返回值可能为负）。
    /// 找不到时返回 0。
    pub fn remove(&mut self, identity: &str, amount: i32) -> i32 {
        self.try_remove(identity, amount).unwrap_or(0)
    }

    pub fn remove_one(&mut self, identity: &str) -> i32 {
        self.remove(identity, 1)
    }

    /// 与 [`Inventory::remove`] 相同，但把“找不到”单独报告出来
    pub fn try_remove(&mut self, identity: &str, amount: i32) -> Result<i32, InventoryError> {
        let &i = self
            .index
            .get(identity)
            .ok_or_else(|| InventoryError::UnknownIdentity(identity.to_string()))?;

        let entry = &mut self.items[i];
        entry.amount = entry.amount.saturating_sub(amount);
        let remaining = entry.amount;
        if remaining <= 0 {
            self.remove_entry(i);
        }
        Ok(remaining)
    }

    pub fn find_by_identity(&self, identity: &str) -> Option<&Item> {
        self.index.get(identity).map(|&i| &self.items[i])
    }

    /// 线性扫描，忽略大小写，返回第一个匹配
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        let name = name.to_lowercase();
        self.items
            .iter()
            .find(|item| item.name.to_lowercase() == name)
    }

    pub fn display_rows(&self) -> Vec<DisplayRow> {
        self.items.iter().map(DisplayRow::from_item).collect()
    }

    /// 把当前快照交给 UI 侧渲染
    pub fn refresh_display(&self, view: &mut impl InventoryView) {
        view.render(&self.display_rows());
    }

    /// 读档后检查一致性：超容量、身份重复或条目本身不合法都视为坏档
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.items.len() > self.capacity {
            return Err(format!(
                "物品数 {} 超过容量 {}",
                self.items.len(),
                self.capacity
            ));
        }
        if self.index.len() != self.items.len() {
            return Err("存在重复的物品身份".to_string());
        }
        for item in &self.items {
            if item.identity.is_empty() {
                return Err(format!("{} 缺少身份", item.name));
            }
            if item.stackable && item.identity != item.name {
                return Err(format!(
                    "可堆叠物品 {} 的身份 {} 与名字不一致",
                    item.name, item.identity
                ));
            }
            if item.amount <= 0 {
                return Err(format!("{} 的数量 {} 不合法", item.name, item.amount));
            }
        }
        Ok(())
    }

    fn insert_entry(&mut self, item: Item) {
        self.index.insert(item.identity.clone(), self.items.len());
        self.items.push(item);
    }

    fn remove_entry(&mut self, i: usize) {
        let removed = self.items.remove(i);
        self.index.remove(&removed.identity);
        self.reindex_from(i);
    }

    // 删除后后面的下标整体前移
    fn reindex_from(&mut self, start: usize) {
        for (i, item) in self.items.iter().enumerate().skip(start) {
            self.index.insert(item.identity.clone(), i);
        }
    }
}
