//! 小型背包系统：物品模板、按 identity 索引的背包、显示快照与存档。

pub mod core;
pub mod data;
pub mod interface;
pub mod inventory;

pub use data::schema::{Item, ItemCatalog, Property};
pub use inventory::components::{Inventory, InventoryError};
pub use inventory::display::{DisplayRow, InventoryDisplay, InventoryView};
