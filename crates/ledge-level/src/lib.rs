//! Ledge Level - Level data loading
//!
//! Level files are JSON or TOML documents listing platform placements, coin
//! and spider spawns, the hero spawn and the optional key, door and
//! decorations. Loading validates the raw file into a [`Level`] whose
//! platform extents and enemy walls are resolved.

mod format;
mod level;
mod loader;

pub use format::{DecorationDef, LevelFile, PlatformDef, SpawnDef};
pub use level::{
    Decoration, EnemyWall, Level, LevelSummary, Platform, WallSide, GROUND_SIZE, TILE_SIZE,
    WALL_HEIGHT, WALL_WIDTH,
};
pub use loader::{load_level, load_level_json, load_level_toml};
