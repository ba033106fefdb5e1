use bevy::prelude::*;

/// Startup → Loading（读物品表）→ InGame（处理背包事件与命令）
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Startup,
    Loading,
    InGame,
}
