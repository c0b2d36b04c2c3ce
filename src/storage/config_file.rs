use anyhow::{Context, Result};
use std::path::Path;

use crate::game::GameConfig;

/// Load a game configuration from a JSON file.
///
/// Fields left out of the file keep their defaults.
pub fn load_game_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let config: GameConfig =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))?;

    Ok(config)
}
