pub mod components;
pub mod display;
pub mod events;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use components::*;
use display::InventoryDisplay;
use events::*;
use systems::*;

pub struct InventoryPlugin {
    pub capacity: usize,
}

impl Default for InventoryPlugin {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY }
    }
}

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(Inventory::with_capacity(self.capacity))
            .init_resource::<InventoryDisplay>()
            .add_event::<GiveItemEvent>()
            .add_event::<RemoveItemEvent>()
            .add_event::<RefreshDisplayEvent>()
            .add_event::<SelectItemEvent>()
            .add_event::<SaveInventoryEvent>()
            .add_event::<LoadInventoryEvent>()
            .add_systems(
                Update,
                (
                    give_item,
                    remove_item,
                    save_inventory,
                    load_inventory,
                    refresh_display,
                    select_item,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
