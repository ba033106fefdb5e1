use super::{components::*, display::*, events::*};
use crate::core::{events::LogEvent, resources::GameConfig};
use crate::data::{persist, schema::ItemCatalog};
use bevy::prelude::*;

/// 处理"give"——按模板实例化后塞进背包
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut inventory: ResMut<Inventory>,
    catalog: Res<ItemCatalog>,
    mut log_event: EventWriter<LogEvent>,
) {
    for ev in ev_give.read() {
        let Some(template) = catalog.get(&ev.name) else {
            warn!("不存在物品 {}", ev.name);
            log_event.write(LogEvent(format!("不存在物品 {}", ev.name)));
            continue;
        };

        // 可堆叠的一次放入整堆；不可堆叠的逐个生成独立实例
        let added = if template.stackable {
            let mut item = template.instantiate();
            item.amount = i32::try_from(ev.count).unwrap_or(i32::MAX);
            if inventory.add(item) { ev.count.max(1) } else { 0 }
        } else {
            let mut added = 0;
            for _ in 0..ev.count.max(1) {
                if !inventory.add_clone(template) {
                    break;
                }
                added += 1;
            }
            added
        };

        if added == 0 {
            warn!("背包已满，无法获得 {}", template.name);
            log_event.write(LogEvent(format!("背包已满，无法获得 {}", template.name)));
        } else {
            info!("获得 {} ×{}", template.name, added);
            log_event.write(LogEvent(format!("获得 {} ×{added}", template.name)));
        }
    }
}

pub fn remove_item(
    mut ev_remove: EventReader<RemoveItemEvent>,
    mut inventory: ResMut<Inventory>,
    mut log_event: EventWriter<LogEvent>,
) {
    for ev in ev_remove.read() {
        match inventory.try_remove(&ev.identity, ev.amount) {
            Ok(remaining) if remaining <= 0 => {
                info!("{} 已移出背包", ev.identity);
                log_event.write(LogEvent(format!("{} 已移出背包", ev.identity)));
            }
            Ok(remaining) => {
                log_event.write(LogEvent(format!("{} 剩余 {remaining}", ev.identity)));
            }
            Err(err) => {
                log_event.write(LogEvent(err.to_string()));
            }
        }
    }
}

/// 重建显示快照并打印
pub fn refresh_display(
    mut ev_refresh: EventReader<RefreshDisplayEvent>,
    inventory: Res<Inventory>,
    mut display: ResMut<InventoryDisplay>,
    mut log_event: EventWriter<LogEvent>,
) {
    if ev_refresh.is_empty() {
        return;
    }
    ev_refresh.clear();

    inventory.refresh_display(display.as_mut());

    log_event.write(LogEvent(format!(
        "背包 {}/{}",
        inventory.len(),
        inventory.capacity()
    )));
    if display.rows().is_empty() {
        log_event.write(LogEvent("  (empty)".into()));
    }
    for (idx, row) in display.rows().iter().enumerate() {
        log_event.write(LogEvent(format!(
            "[{idx}] {} (id={})",
            row.label.replace('\n', " "),
            row.identity
        )));
    }
}

pub fn select_item(
    mut ev_select: EventReader<SelectItemEvent>,
    display: Res<InventoryDisplay>,
    mut log_event: EventWriter<LogEvent>,
) {
    for ev in ev_select.read() {
        match display.select(ev.index) {
            Some(identity) => {
                info!("You've selected {identity}");
                log_event.write(LogEvent(format!("选中了 {identity}")));
            }
            None => {
                log_event.write(LogEvent("显示列表里没有这一行，先执行 inventory".into()));
            }
        }
    }
}

pub fn save_inventory(
    mut ev_save: EventReader<SaveInventoryEvent>,
    inventory: Res<Inventory>,
    config: Res<GameConfig>,
    mut log_event: EventWriter<LogEvent>,
) {
    if ev_save.is_empty() {
        return;
    }
    ev_save.clear();

    match persist::save_inventory(&config.save_path, &inventory) {
        Ok(()) => log_event.write(LogEvent(format!("已保存到 {}", config.save_path))),
        Err(err) => {
            error!("保存失败: {err}");
            log_event.write(LogEvent(format!("保存失败: {err}")))
        }
    };
}

/// 读档整体替换背包；失败时保持原状
pub fn load_inventory(
    mut ev_load: EventReader<LoadInventoryEvent>,
    mut inventory: ResMut<Inventory>,
    config: Res<GameConfig>,
    mut log_event: EventWriter<LogEvent>,
) {
    if ev_load.is_empty() {
        return;
    }
    ev_load.clear();

    match persist::load_inventory(&config.save_path) {
        Ok(loaded) => {
            *inventory = loaded;
            log_event.write(LogEvent(format!("已读取 {} 件物品", inventory.len())));
        }
        Err(err) => {
            error!("读取失败: {err}");
            log_event.write(LogEvent(format!("读取失败: {err}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::states::AppState;
    use crate::data::schema::{Item, Property};
    use crate::inventory::InventoryPlugin;
    use bevy::state::app::StatesPlugin;

    fn test_app(capacity: usize, save_path: String) -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(AppState::InGame)
            .add_event::<LogEvent>()
            .insert_resource(GameConfig {
                save_path,
                ..Default::default()
            })
            .insert_resource(ItemCatalog {
                items: vec![
                    Item::new("Gold", true),
                    Item::new("Sword", false).with_property(Property::new("damage", 9.0, "")),
                ],
            })
            .add_plugins(InventoryPlugin { capacity });
        app
    }

    fn inventory(app: &App) -> &Inventory {
        app.world().resource::<Inventory>()
    }

    #[test]
    fn give_stacks_and_respects_capacity() {
        let mut app = test_app(2, String::new());
        app.world_mut().send_event(GiveItemEvent { name: "gold".into(), count: 5 });
        app.world_mut().send_event(GiveItemEvent { name: "Sword".into(), count: 3 });
        app.update();

        let inv = inventory(&app);
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.find_by_identity("Gold").map(|i| i.amount), Some(5));

        app.world_mut().send_event(GiveItemEvent { name: "Gold".into(), count: 3 });
        app.update();
        assert_eq!(inventory(&app).find_by_identity("Gold").map(|i| i.amount), Some(8));
    }

    #[test]
    fn remove_and_refresh_update_display() {
        let mut app = test_app(4, String::new());
        app.world_mut().send_event(GiveItemEvent { name: "Gold".into(), count: 8 });
        app.world_mut().send_event(GiveItemEvent { name: "Sword".into(), count: 1 });
        app.update();

        // 增删不自动刷新
        assert!(app.world().resource::<InventoryDisplay>().rows().is_empty());

        app.world_mut().send_event(RemoveItemEvent { identity: "Gold".into(), amount: 8 });
        app.world_mut().send_event(RefreshDisplayEvent);
        app.update();

        let display = app.world().resource::<InventoryDisplay>();
        assert_eq!(display.rows().len(), 1);
        assert_eq!(display.rows()[0].name, "Sword");
        assert!(inventory(&app).find_by_identity("Gold").is_none());
    }

    #[test]
    fn save_and_load_through_events() {
        let dir = std::env::temp_dir().join(format!("bagel_inventory_sys_{}", uuid::Uuid::new_v4()));
        let path = dir.join("inventory.json");
        let mut app = test_app(4, path.to_string_lossy().into_owned());

        app.world_mut().send_event(GiveItemEvent { name: "Gold".into(), count: 4 });
        app.update();
        app.world_mut().send_event(SaveInventoryEvent);
        app.update();
        let saved = inventory(&app).clone();

        app.world_mut().send_event(RemoveItemEvent { identity: "Gold".into(), amount: 4 });
        app.update();
        assert!(inventory(&app).is_empty());

        app.world_mut().send_event(LoadInventoryEvent);
        app.update();
        assert_eq!(inventory(&app), &saved);

        let _ = std::fs::remove_dir_all(dir);
    }
}
