//! Spider patrol between walls

use crate::frame::Touching;

/// Horizontal velocity for a patrolling spider after this frame's contacts.
///
/// Blocked on the right sends it left, blocked on the left sends it right,
/// no contact keeps the current velocity. Right is checked first.
pub fn patrol_velocity(current: f32, touching: &Touching, speed: f32) -> f32 {
    if touching.right {
        -speed
    } else if touching.left {
        speed
    } else {
        current
    }
}
