//! Game events produced by the policy for the host to apply

use ledge_core::{EntityId, Facing, HeroAnimation};
use serde::{Deserialize, Serialize};

/// A state transition the host must reflect (sprite, sound, removal, reload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Hero switched to a different animation
    HeroAnimationChanged { animation: HeroAnimation },
    HeroFacingChanged { facing: Facing },
    HeroJumped,
    /// Hero landed on a spider and bounced off it
    HeroBounced { enemy: EntityId },
    /// Hero ran into a spider; the level restarts
    HeroKilled { enemy: EntityId },
    /// A spider hit a wall and reversed
    EnemyTurned { enemy: EntityId, velocity_x: f32 },
    /// A spider started its death animation
    EnemyKilled { enemy: EntityId },
    /// A spider finished dying and leaves play
    EnemyRemoved { enemy: EntityId },
    CoinCollected { coin: EntityId },
    ScoreChanged { score: u32 },
    KeyCollected { key: EntityId },
    /// Every entity respawned from level data and the score is zero
    LevelRestarted,
    LevelCompleted,
}

impl GameEvent {
    /// Sound the host plays for this event, if any
    pub fn sound_cue(&self) -> Option<&'static str> {
        match self {
            GameEvent::HeroJumped => Some("sfx:jump"),
            GameEvent::CoinCollected { .. } => Some("sfx:coin"),
            GameEvent::HeroBounced { .. } | GameEvent::HeroKilled { .. } => Some("sfx:stomp"),
            GameEvent::KeyCollected { .. } => Some("sfx:key"),
            GameEvent::LevelCompleted => Some("sfx:door"),
            _ => None,
        }
    }

    /// Entity this event removes from play, if any
    pub fn removed_entity(&self) -> Option<EntityId> {
        match self {
            GameEvent::EnemyRemoved { enemy } => Some(*enemy),
            GameEvent::CoinCollected { coin } => Some(*coin),
            GameEvent::KeyCollected { key } => Some(*key),
            _ => None,
        }
    }
}
