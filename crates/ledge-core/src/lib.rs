//! Ledge Core - Foundational types for the Ledge platformer
//!
//! This crate provides the types every other Ledge crate depends on:
//! - `EntityId` / `IdAllocator` - Per-level entity identifiers
//! - `Vec2`, `Rect` - 2D spatial types
//! - `Facing`, `HeroAnimation`, `EnemyAnimation` - Sprite state enums
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{LedgeError, Result};
pub use id::{EntityId, IdAllocator};
pub use types::{EnemyAnimation, Facing, HeroAnimation, Rect, Vec2};
