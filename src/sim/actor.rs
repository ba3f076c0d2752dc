//! Basket movement
//!
//! One-dimensional kinematics: accelerate toward the held direction, coast
//! with friction when nothing is held, stay inside the arena.

use super::state::Actor;

/// Directional input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Steering {
    pub const NONE: Self = Self {
        moving_left: false,
        moving_right: false,
    };
    pub const LEFT: Self = Self {
        moving_left: true,
        moving_right: false,
    };
    pub const RIGHT: Self = Self {
        moving_left: false,
        moving_right: true,
    };
}

/// Advance the basket by one frame.
///
/// Right wins when both directions are held. Friction decays velocity
/// exponentially and never quite reaches zero, so the basket coasts.
/// Hitting either wall stops the basket dead.
pub fn step_actor(actor: &mut Actor, steering: Steering, arena_width: f32) {
    if steering.moving_right {
        actor.velocity += actor.acceleration;
    } else if steering.moving_left {
        actor.velocity -= actor.acceleration;
    } else {
        actor.velocity *= actor.friction;
    }

    actor.velocity = actor.velocity.clamp(-actor.max_speed, actor.max_speed);
    actor.x += actor.velocity;

    let max_x = (arena_width - actor.width).max(0.0);
    if actor.x < 0.0 {
        actor.x = 0.0;
        actor.velocity = 0.0;
    } else if actor.x > max_x {
        actor.x = max_x;
        actor.velocity = 0.0;
    }
}
