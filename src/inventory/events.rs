use bevy::prelude::*;

/// 按模板名发放物品
#[derive(Event)]
pub struct GiveItemEvent {
    pub name:  String,
    pub count: u32,
}

#[derive(Event)]
pub struct RemoveItemEvent {
    pub identity: String,
    pub amount:   i32,
}

/// 增删不会自动刷新，需要显式发这个
#[derive(Event)]
pub struct RefreshDisplayEvent;

/// 选中显示列表中的第 index 行
#[derive(Event)]
pub struct SelectItemEvent {
    pub index: usize,
}

#[derive(Event)]
pub struct SaveInventoryEvent;

#[derive(Event)]
pub struct LoadInventoryEvent;
