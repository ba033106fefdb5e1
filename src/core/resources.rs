use bevy::prelude::*;
use serde_derive::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::inventory::components::DEFAULT_CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// 全局配置，来自 config.toml，缺省项走默认值
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub inventory_capacity: usize,
    /// 相对 assets/ 的物品表目录，目录下每个 *.items.ron 都会被读入
    pub items_dir: String,
    pub save_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            inventory_capacity: DEFAULT_CAPACITY,
            items_dir: "data/items".into(),
            save_path: "saves/inventory.json".into(),
        }
    }
}

impl GameConfig {
    pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// 文件不存在时直接用默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_toml(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("inventory_capacity = 5").unwrap();
        assert_eq!(config.inventory_capacity, 5);
        assert_eq!(config.items_dir, "data/items");
        assert_eq!(config.save_path, "saves/inventory.json");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = GameConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(
            GameConfig::from_toml("inventory_capacity = \"lots\""),
            Err(ConfigError::Toml(_))
        ));
    }
}
