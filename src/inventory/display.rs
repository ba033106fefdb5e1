use bevy::prelude::*;

use crate::data::schema::Item;

/// UI 列表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub identity: String,
    pub name: String,
    pub amount: i32,
    pub stackable: bool,
    pub label: String,
}

impl DisplayRow {
    pub fn from_item(item: &Item) -> Self {
        let label = if item.stackable {
            format!("{}\n({})", item.name, item.amount)
        } else {
            item.name.clone()
        };
        Self {
            identity: item.identity.clone(),
            name: item.name.clone(),
            amount: item.amount,
            stackable: item.stackable,
            label,
        }
    }
}

/// 渲染方：拿到整份快照自行决定怎么画
pub trait InventoryView {
    fn render(&mut self, rows: &[DisplayRow]);
}

/// 最近一次刷新的快照，选中行时据此取回 identity
#[derive(Resource, Debug, Default)]
pub struct InventoryDisplay {
    rows: Vec<DisplayRow>,
}

impl InventoryDisplay {
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn select(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|row| row.identity.as_str())
    }
}

impl InventoryView for InventoryDisplay {
    fn render(&mut self, rows: &[DisplayRow]) {
        self.rows = rows.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::components::Inventory;

    #[test]
    fn rows_follow_insertion_order_and_label_format() {
        let mut inv = Inventory::with_capacity(3);
        let sword = Item::new("Sword", false).instantiate();
        inv.add(sword.clone());
        inv.add(Item::new("Gold", true).with_amount(8));

        let mut display = InventoryDisplay::default();
        inv.refresh_display(&mut display);

        let labels: Vec<_> = display.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Sword", "Gold\n(8)"]);
        assert_eq!(display.select(0), Some(sword.identity.as_str()));
        assert_eq!(display.select(1), Some("Gold"));
        assert_eq!(display.select(2), None);
    }

    #[test]
    fn display_is_a_snapshot_until_refreshed() {
        let mut inv = Inventory::with_capacity(3);
        inv.add(Item::new("Gold", true).with_amount(2));
        let mut display = InventoryDisplay::default();
        inv.refresh_display(&mut display);

        inv.add(Item::new("Gold", true).with_amount(3));
        assert_eq!(display.rows()[0].amount, 2);

        inv.refresh_display(&mut display);
        assert_eq!(display.rows()[0].label, "Gold\n(5)");
    }
}
