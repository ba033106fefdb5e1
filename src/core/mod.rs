use bevy::prelude::*;

pub mod events;
pub mod resources;
pub mod states;

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        app
            .init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .init_resource::<resources::GameConfig>() // main 里已插入时不会覆盖
            .add_systems(Startup, events::hello_world);
    }
}
