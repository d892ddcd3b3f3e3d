//! Level loading from JSON or TOML files

use crate::format::LevelFile;
use crate::level::Level;
use ledge_core::{LedgeError, Result};
use std::fs;
use std::path::Path;

/// Load a level file, choosing the decoder from the file extension
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let level = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_level_json(&content),
        Some("toml") => load_level_toml(&content),
        other => Err(LedgeError::ParseError(format!(
            "unsupported level file extension {:?} for {}; expected .json or .toml",
            other.unwrap_or(""),
            path.display()
        ))),
    }?;

    tracing::info!(
        path = %path.display(),
        platforms = level.platforms.len(),
        coins = level.coins.len(),
        spiders = level.spiders.len(),
        "loaded level"
    );
    Ok(level)
}

/// Load a level from a JSON string
pub fn load_level_json(content: &str) -> Result<Level> {
    let file: LevelFile = serde_json::from_str(content)?;
    Level::from_file(file)
}

/// Load a level from a TOML string
pub fn load_level_toml(content: &str) -> Result<Level> {
    let file: LevelFile = toml::from_str(content)?;
    Level::from_file(file)
}
