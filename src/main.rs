use anyhow::Context;
use bevy::prelude::*;

use bagel_inventory::core::{CorePlugin, events::LogEvent, resources::GameConfig, states};
use bagel_inventory::data::DataPlugin;
use bagel_inventory::interface::debug_cli::DebugCliPlugin;
use bagel_inventory::inventory::InventoryPlugin;

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default("config.toml").context("读取 config.toml 失败")?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                visible: false,
                ..default()
            }),   // 隐藏窗口，实现“无 UI”
            ..default()
        }))
        .insert_resource(config.clone())
        .add_plugins(CorePlugin)
        .add_plugins(DebugCliPlugin)
        .add_plugins(DataPlugin)
        .add_plugins(InventoryPlugin { capacity: config.inventory_capacity })
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();
    Ok(())
}

fn forward_log_event(mut reader: EventReader<LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
