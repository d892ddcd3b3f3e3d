//! Validated level data

use crate::format::{DecorationDef, LevelFile, PlatformDef, SpawnDef};
use ledge_core::{LedgeError, Rect, Result, Vec2};
use serde::Serialize;

/// Edge length of one grass tile in pixels
pub const TILE_SIZE: f32 = 42.0;
/// Extent of the full-width `ground` image
pub const GROUND_SIZE: (f32, f32) = (960.0, 42.0);
/// Invisible enemy walls placed at each platform edge
pub const WALL_WIDTH: f32 = 16.0;
pub const WALL_HEIGHT: f32 = 32.0;

/// A static, immovable platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platform {
    pub image: String,
    pub bounds: Rect,
}

/// Which edge of its platform a wall guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    Left,
    Right,
}

/// Invisible wall that only spiders collide with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyWall {
    pub side: WallSide,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoration {
    pub position: Vec2,
    pub frame: u32,
}

/// A level ready to be spawned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub hero: Vec2,
    pub platforms: Vec<Platform>,
    pub walls: Vec<EnemyWall>,
    pub coins: Vec<Vec2>,
    pub spiders: Vec<Vec2>,
    pub decorations: Vec<Decoration>,
    pub key: Option<Vec2>,
    pub door: Option<Vec2>,
}

/// Entity counts reported by `ledge validate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    pub hero: Vec2,
    pub platforms: usize,
    pub walls: usize,
    pub coins: usize,
    pub spiders: usize,
    pub decorations: usize,
    pub has_key: bool,
    pub has_door: bool,
}

impl Level {
    /// Validate a raw level file
    pub fn from_file(file: LevelFile) -> Result<Self> {
        let hero = file
            .hero
            .as_ref()
            .ok_or_else(|| LedgeError::MissingRequiredField("hero".into()))
            .and_then(|spawn| spawn_position(spawn, "hero"))?;

        let platform_defs = file
            .platforms
            .ok_or_else(|| LedgeError::MissingRequiredField("platforms".into()))?;
        if platform_defs.is_empty() {
            return Err(LedgeError::ValidationError(
                "level must contain at least one platform".into(),
            ));
        }

        let platforms = platform_defs
            .iter()
            .enumerate()
            .map(|(i, def)| resolve_platform(def, i))
            .collect::<Result<Vec<_>>>()?;

        let walls = platforms.iter().flat_map(enemy_walls).collect();

        let coins = file
            .coins
            .iter()
            .enumerate()
            .map(|(i, c)| spawn_position(c, &format!("coins[{i}]")))
            .collect::<Result<Vec<_>>>()?;

        let spiders = file
            .spiders
            .iter()
            .enumerate()
            .map(|(i, s)| spawn_position(s, &format!("spiders[{i}]")))
            .collect::<Result<Vec<_>>>()?;

        let decorations = file
            .decoration
            .iter()
            .enumerate()
            .map(|(i, d)| resolve_decoration(d, i))
            .collect::<Result<Vec<_>>>()?;

        let key = file
            .key
            .as_ref()
            .map(|k| spawn_position(k, "key"))
            .transpose()?;
        let door = file
            .door
            .as_ref()
            .map(|d| spawn_position(d, "door"))
            .transpose()?;

        Ok(Self {
            hero,
            platforms,
            walls,
            coins,
            spiders,
            decorations,
            key,
            door,
        })
    }

    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            hero: self.hero,
            platforms: self.platforms.len(),
            walls: self.walls.len(),
            coins: self.coins.len(),
            spiders: self.spiders.len(),
            decorations: self.decorations.len(),
            has_key: self.key.is_some(),
            has_door: self.door.is_some(),
        }
    }
}

fn require(value: Option<f32>, field: &str) -> Result<f32> {
    let v = value.ok_or_else(|| LedgeError::MissingRequiredField(field.to_string()))?;
    if !v.is_finite() {
        return Err(LedgeError::ValidationError(format!(
            "{field} must be a finite number, got {v}"
        )));
    }
    Ok(v)
}

fn spawn_position(spawn: &SpawnDef, path: &str) -> Result<Vec2> {
    Ok(Vec2::new(
        require(spawn.x, &format!("{path}.x"))?,
        require(spawn.y, &format!("{path}.y"))?,
    ))
}

fn resolve_decoration(def: &DecorationDef, index: usize) -> Result<Decoration> {
    let path = format!("decoration[{index}]");
    Ok(Decoration {
        position: Vec2::new(
            require(def.x, &format!("{path}.x"))?,
            require(def.y, &format!("{path}.y"))?,
        ),
        frame: def.frame,
    })
}

fn resolve_platform(def: &PlatformDef, index: usize) -> Result<Platform> {
    let path = format!("platforms[{index}]");
    let x = require(def.x, &format!("{path}.x"))?;
    let y = require(def.y, &format!("{path}.y"))?;
    let image = def
        .image
        .clone()
        .ok_or_else(|| LedgeError::MissingRequiredField(format!("{path}.image")))?;

    let (width, height) = match (def.width, def.height) {
        (Some(w), Some(h)) => (w, h),
        (Some(_), None) => {
            return Err(LedgeError::MissingRequiredField(format!("{path}.height")))
        }
        (None, Some(_)) => {
            return Err(LedgeError::MissingRequiredField(format!("{path}.width")))
        }
        (None, None) => image_extent(&image).ok_or_else(|| {
            LedgeError::ValidationError(format!(
                "{path}: cannot infer the size of image '{image}', give width and height"
            ))
        })?,
    };
    if !(width > 0.0 && height > 0.0) {
        return Err(LedgeError::ValidationError(format!(
            "{path}: extent must be positive, got {width}x{height}"
        )));
    }

    Ok(Platform {
        image,
        bounds: Rect::new(x, y, width, height),
    })
}

/// Extent implied by an image key: `ground` or `grass:WxH` in tiles
fn image_extent(image: &str) -> Option<(f32, f32)> {
    if image == "ground" {
        return Some(GROUND_SIZE);
    }
    let tiles = image.strip_prefix("grass:")?;
    let (w, h) = tiles.split_once('x')?;
    let w: u32 = w.parse().ok()?;
    let h: u32 = h.parse().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w as f32 * TILE_SIZE, h as f32 * TILE_SIZE))
}

/// The two walls standing on a platform's top surface at its edges
fn enemy_walls(platform: &Platform) -> [EnemyWall; 2] {
    let b = platform.bounds;
    let top = b.top() - WALL_HEIGHT;
    [
        EnemyWall {
            side: WallSide::Left,
            bounds: Rect::new(b.left() - WALL_WIDTH, top, WALL_WIDTH, WALL_HEIGHT),
        },
        EnemyWall {
            side: WallSide::Right,
            bounds: Rect::new(b.right(), top, WALL_WIDTH, WALL_HEIGHT),
        },
    ]
}
