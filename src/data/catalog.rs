//! 模板 → 运行时实例

use uuid::Uuid;

use super::schema::{Item, ItemCatalog};

impl Item {
    /// 从模板复制出一个独立实例，并修正数量 / 身份
    pub fn instantiate(&self) -> Item {
        let mut item = self.clone();
        item.normalize();
        item
    }

    /// 数量 0 视为 1；身份为空时重新生成
    pub fn normalize(&mut self) {
        self.rebuild_property_index();
        if self.amount == 0 {
            self.amount = 1;
        }
        if self.identity.is_empty() {
            self.regenerate_identity();
        }
    }

    /// 可堆叠物品用名字做身份，不可堆叠的每次生成新 uuid
    pub fn regenerate_identity(&mut self) {
        self.identity = if self.stackable {
            self.name.clone()
        } else {
            Uuid::new_v4().to_string()
        };
    }
}

impl ItemCatalog {
    /// 按名字查模板（忽略大小写，取第一个）
    pub fn get(&self, name: &str) -> Option<&Item> {
        let name = name.to_lowercase();
        self.items
            .iter()
            .find(|template| template.name.to_lowercase() == name)
    }

    /// 按顺序拼接多份物品表，同名模板以先出现的为准
    pub fn merged<'a>(parts: impl IntoIterator<Item = &'a ItemCatalog>) -> ItemCatalog {
        ItemCatalog {
            items: parts
                .into_iter()
                .flat_map(|part| part.items.iter().cloned())
                .collect(),
        }
    }

    pub fn instantiate(&self, name: &str) -> Option<Item> {
        self.get(name).map(Item::instantiate)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
