//! Spatial and sprite-state types

use serde::{Deserialize, Serialize};

/// A 2D vector in screen space (y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Horizontal facing of a sprite
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal direction; `None` when the direction is zero
    pub fn from_direction(direction: f32) -> Option<Self> {
        if direction < 0.0 {
            Some(Facing::Left)
        } else if direction > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

/// Animation the hero sprite is playing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroAnimation {
    #[default]
    Stopped,
    Running,
    Jumping,
    Falling,
}

impl HeroAnimation {
    /// Name of the sprite-sheet animation the host plays for this state
    pub fn clip_name(self) -> &'static str {
        match self {
            HeroAnimation::Stopped => "stop",
            HeroAnimation::Running => "run",
            HeroAnimation::Jumping => "jump",
            HeroAnimation::Falling => "fall",
        }
    }
}

/// Animation a spider sprite is playing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyAnimation {
    #[default]
    Crawling,
    Dying,
}

impl EnemyAnimation {
    pub fn clip_name(self) -> &'static str {
        match self {
            EnemyAnimation::Crawling => "crawl",
            EnemyAnimation::Dying => "die",
        }
    }
}
