//! 背包存档：JSON 读写

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::inventory::components::Inventory;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Could not access save file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not (de)serialize inventory: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Save file is inconsistent: {0}")]
    Corrupt(String),
}

pub fn save_inventory(path: impl AsRef<Path>, inventory: &Inventory) -> Result<(), PersistError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(inventory)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_inventory(path: impl AsRef<Path>) -> Result<Inventory, PersistError> {
    let json = fs::read_to_string(path)?;
    let inventory: Inventory = serde_json::from_str(&json)?;
    inventory.validate().map_err(PersistError::Corrupt)?;
    Ok(inventory)
}
