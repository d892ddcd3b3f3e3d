//! The game-state value threaded through every frame

use crate::tuning::Tuning;
use ledge_core::{EnemyAnimation, EntityId, Facing, HeroAnimation, IdAllocator, Vec2};
use ledge_level::Level;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hero {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub animation: HeroAnimation,
    /// Resting on a surface (contact on the downward side)
    pub grounded: bool,
    pub has_key: bool,
}

impl Hero {
    pub fn spawn(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// A patrolling spider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
    pub animation: EnemyAnimation,
    /// Seconds of death animation left; only meaningful while dying
    pub dying_remaining: f32,
}

impl Enemy {
    /// Spiders start crawling to the right
    pub fn spawn(id: EntityId, position: Vec2, speed: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::new(speed, 0.0),
            alive: true,
            animation: EnemyAnimation::Crawling,
            dying_remaining: 0.0,
        }
    }

    pub fn is_dying(&self) -> bool {
        !self.alive
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coin {
    pub id: EntityId,
    pub position: Vec2,
    pub collected: bool,
}

/// The key that unlocks the door
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyItem {
    pub id: EntityId,
    pub position: Vec2,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Door {
    pub id: EntityId,
    pub position: Vec2,
}

/// Coins collected since the last restart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 += 1;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Playing,
    /// The hero went through the door; the policy no longer changes anything
    Complete,
}

/// Everything the policy reads and writes between frames
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameState {
    pub hero: Hero,
    /// Live and dying spiders; removed once their death animation ends
    pub enemies: Vec<Enemy>,
    /// All coins of the level, collected ones included
    pub coins: Vec<Coin>,
    pub key: Option<KeyItem>,
    pub door: Option<Door>,
    pub score: Score,
    pub phase: Phase,
}

impl GameState {
    /// Fresh state for a level: everything at its spawn point, score zero.
    ///
    /// Ids are allocated spiders first, then coins, key and door, so the same
    /// level always yields the same ids.
    pub fn spawn(level: &Level, tuning: &Tuning) -> Self {
        let mut ids = IdAllocator::new();

        let enemies = level
            .spiders
            .iter()
            .map(|&pos| Enemy::spawn(ids.next_id(), pos, tuning.spider_speed))
            .collect();

        let coins = level
            .coins
            .iter()
            .map(|&position| Coin {
                id: ids.next_id(),
                position,
                collected: false,
            })
            .collect();

        let key = level.key.map(|position| KeyItem {
            id: ids.next_id(),
            position,
            collected: false,
        });

        let door = level.door.map(|position| Door {
            id: ids.next_id(),
            position,
        });

        Self {
            hero: Hero::spawn(level.hero),
            enemies,
            coins,
            key,
            door,
            score: Score::default(),
            phase: Phase::Playing,
        }
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn coin(&self, id: EntityId) -> Option<&Coin> {
        self.coins.iter().find(|c| c.id == id)
    }

    pub fn coin_mut(&mut self, id: EntityId) -> Option<&mut Coin> {
        self.coins.iter_mut().find(|c| c.id == id)
    }

    /// Coins still in play
    pub fn active_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.collected)
    }

    pub fn collected_coins(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }

    /// Spiders that can still hurt the hero
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    /// The door opens once the key is held, or straight away in keyless levels
    pub fn door_unlocked(&self) -> bool {
        self.key.is_none() || self.hero.has_key
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
}
