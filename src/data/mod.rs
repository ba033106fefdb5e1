pub mod catalog;
pub mod loader;
pub mod persist;
pub mod schema;

use bevy::asset::{LoadState, LoadedFolder, RecursiveDependencyLoadState};
use bevy::prelude::*;
use schema::ItemCatalog;
use crate::core::{resources::GameConfig, states::AppState};

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    folder: Option<Handle<LoadedFolder>>,
    failed: Option<String>,
}

impl ItemAssets {
    /// 物品表目录加载失败时的原因
    pub fn failure(&self) -> Option<&str> {
        self.failed.as_deref()
    }
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemCatalog>()
            .register_asset_loader(loader::RonItemLoader)
            // 注册资源
            .init_resource::<ItemAssets>()
            .init_resource::<ItemCatalog>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    info!("加载物品表目录: {}", config.items_dir);
    item_assets.folder = Some(asset_server.load_folder(config.items_dir.clone()));
    item_assets.failed = None;
}

/// 目录里的物品表全部就绪后按路径排序合并，作为 Resource 供游戏逻辑读取
fn check_loaded(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
    folders: Res<Assets<LoadedFolder>>,
    catalogs: Res<Assets<ItemCatalog>>,
) {
    if item_assets.failed.is_some() {
        return;
    }
    let Some(h) = item_assets.folder.clone() else {
        return;
    };

    let failure = match (
        asset_server.load_state(&h),
        asset_server.recursive_dependency_load_state(&h),
    ) {
        (LoadState::Failed(err), _) => Some(err.to_string()),
        (_, RecursiveDependencyLoadState::Failed(err)) => Some(err.to_string()),
        _ => None,
    };
    if let Some(reason) = failure {
        error!("物品表加载失败: {reason}");
        item_assets.failed = Some(reason);
        return;
    }

    if !asset_server.is_loaded_with_dependencies(&h) {
        return;
    }
    let Some(folder) = folders.get(&h) else {
        return;
    };

    let mut parts: Vec<(String, &ItemCatalog)> = folder
        .handles
        .iter()
        .filter_map(|untyped| {
            let typed = untyped.clone().try_typed::<ItemCatalog>().ok()?;
            let path = typed.path()?.to_string();
            Some((path, catalogs.get(&typed)?))
        })
        .collect();
    parts.sort_by(|a, b| a.0.cmp(&b.0));

    let catalog = ItemCatalog::merged(parts.iter().map(|(_, part)| *part));
    info!("✔ Items loaded: {} ({} files)", catalog.len(), parts.len());
    commands.insert_resource(catalog);
    next.set(AppState::InGame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetPlugin;
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    fn loading_app(items_dir: &str) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .insert_state(AppState::Loading)
            .insert_resource(GameConfig {
                items_dir: items_dir.into(),
                ..Default::default()
            })
            .add_plugins(DataPlugin);
        app
    }

    /// 资产在后台线程加载，轮询到条件成立或超时
    fn pump_until(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..500 {
            app.update();
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("timed out waiting for item assets");
    }

    fn in_game(app: &App) -> bool {
        *app.world().resource::<State<AppState>>().get() == AppState::InGame
    }

    #[test]
    fn loads_and_merges_every_file_in_folder() {
        let mut app = loading_app("data/items");
        pump_until(&mut app, in_game);

        let catalog = app.world().resource::<ItemCatalog>();
        let names: Vec<_> = catalog.items.iter().map(|i| i.name.as_str()).collect();
        // consumables.items.ron 排在 equipment.items.ron 前面
        assert_eq!(names, ["Gold", "Potion", "Sword", "Shield", "Key"]);
        assert!(catalog.get("gold").unwrap().stackable);
        assert_eq!(catalog.get("Sword").unwrap().property_value("damage"), 12.0);
    }

    #[test]
    fn missing_folder_is_reported_instead_of_spinning() {
        let mut app = loading_app("data/no_such_folder");
        pump_until(&mut app, |app| {
            app.world().resource::<ItemAssets>().failure().is_some()
        });
        assert!(!in_game(&app));
    }
}
