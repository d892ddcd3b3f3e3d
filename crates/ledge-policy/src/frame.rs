//! Physical state of one frame, as resolved by the host's physics

use ledge_core::{EntityId, Vec2};
use serde::{Deserialize, Serialize};

/// Sides on which a body is blocked by a platform or wall this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Touching {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Touching {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::default()
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    #[serde(default)]
    pub touching: Touching,
}

impl BodyState {
    pub fn grounded(&self) -> bool {
        self.touching.down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyBody {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    #[serde(default)]
    pub touching: Touching,
}

/// Host report for one frame: bodies after physics, plus what the hero overlaps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFrame {
    /// Seconds covered by this frame; the tuning's fixed timestep when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<f32>,
    pub hero: BodyState,
    #[serde(default)]
    pub enemies: Vec<EnemyBody>,
    #[serde(default)]
    pub coin_overlaps: Vec<EntityId>,
    #[serde(default)]
    pub enemy_overlaps: Vec<EntityId>,
    #[serde(default)]
    pub key_overlap: bool,
    #[serde(default)]
    pub door_overlap: bool,
}

impl ResolvedFrame {
    /// A frame where the hero stands still on the ground at `position`
    pub fn grounded_at(position: Vec2) -> Self {
        Self {
            hero: BodyState {
                position,
                velocity: Vec2::ZERO,
                touching: Touching::down(),
            },
            ..Default::default()
        }
    }

    /// A frame where the hero is airborne with the given velocity
    pub fn airborne(position: Vec2, velocity: Vec2) -> Self {
        Self {
            hero: BodyState {
                position,
                velocity,
                touching: Touching::none(),
            },
            ..Default::default()
        }
    }

    pub fn with_hero_velocity(mut self, velocity: Vec2) -> Self {
        self.hero.velocity = velocity;
        self
    }

    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = Some(dt);
        self
    }

    pub fn with_enemy(mut self, body: EnemyBody) -> Self {
        self.enemies.push(body);
        self
    }

    pub fn with_coin_overlap(mut self, coin: EntityId) -> Self {
        self.coin_overlaps.push(coin);
        self
    }

    pub fn with_enemy_overlap(mut self, enemy: EntityId) -> Self {
        self.enemy_overlaps.push(enemy);
        self
    }

    pub fn with_key_overlap(mut self) -> Self {
        self.key_overlap = true;
        self
    }

    pub fn with_door_overlap(mut self) -> Self {
        self.door_overlap = true;
        self
    }
}
