//! Hero animation selection

use ledge_core::{HeroAnimation, Vec2};

/// Pick the hero animation from its velocity and ground contact.
///
/// First match wins: rising is always a jump, otherwise being off the ground
/// is a fall, otherwise horizontal motion is a run.
pub fn select_hero_animation(velocity: Vec2, grounded: bool) -> HeroAnimation {
    if velocity.y < 0.0 {
        HeroAnimation::Jumping
    } else if !grounded {
        HeroAnimation::Falling
    } else if velocity.x != 0.0 {
        HeroAnimation::Running
    } else {
        HeroAnimation::Stopped
    }
}
