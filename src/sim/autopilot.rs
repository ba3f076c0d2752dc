//! Demo mode steering
//!
//! Chases the lowest reward and sidesteps hazards about to land in the
//! basket. Good enough to keep a session alive for a while, not to win.

use super::actor::Steering;
use super::collision::overlaps_horizontally;
use super::state::Session;

/// How far above the basket a hazard starts being dodged (pixels)
const DANGER_ZONE: f32 = 160.0;
/// Close enough to the target to stop steering (pixels)
const DEAD_ZONE: f32 = 6.0;

/// Steering for one frame of demo play
pub fn demo_steering(session: &Session) -> Steering {
    let actor = &session.actor;
    let pool = &session.pool;

    let threat = pool
        .iter()
        .filter(|o| o.is_hazard())
        .filter(|o| o.bottom() > actor.y - DANGER_ZONE && o.pos.y < actor.y + actor.height)
        .filter(|o| overlaps_horizontally(o, actor))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target_x = if let Some(hazard) = threat {
        // Step a full basket width away from the hazard
        let hazard_center = hazard.pos.x + hazard.size / 2.0;
        if hazard_center > actor.center_x() {
            actor.center_x() - actor.width
        } else {
            actor.center_x() + actor.width
        }
    } else {
        pool.iter()
            .filter(|o| o.is_reward() && o.bottom() <= actor.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|o| o.pos.x + o.size / 2.0)
            .unwrap_or(session.config.arena.width / 2.0)
    };

    let delta = target_x - actor.center_x();
    if delta.abs() < DEAD_ZONE {
        return Steering::NONE;
    }

    // Coast when current velocity will carry us there under friction
    let coasting = actor.velocity * actor.friction / (1.0 - actor.friction).max(f32::EPSILON);
    if delta.signum() == actor.velocity.signum() && coasting.abs() >= delta.abs() {
        return Steering::NONE;
    }

    if delta > 0.0 {
        Steering::RIGHT
    } else {
        Steering::LEFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use glam::Vec2;

    fn session_with(objects: &[(f32, f32, i32)]) -> Session {
        let mut session = Session::new(GameConfig::default(), 1);
        let mut pool = session.pool.take();
        for (obj, &(x, y, delta)) in pool.iter_mut().zip(objects) {
            obj.pos = Vec2::new(x, y);
            obj.size = 30.0;
            obj.score_delta = delta;
        }
        pool.truncate(objects.len());
        session.pool.restore(pool);
        session
    }

    #[test]
    fn test_chases_lowest_reward() {
        // Basket centered at 400
        let session = session_with(&[(100.0, 300.0, 1), (650.0, 100.0, 1)]);
        assert_eq!(demo_steering(&session), Steering::LEFT);
    }

    #[test]
    fn test_dodges_incoming_hazard() {
        // Hazard right of center, just above the basket
        let session = session_with(&[(420.0, 480.0, -5), (100.0, 50.0, 1)]);
        assert_eq!(demo_steering(&session), Steering::LEFT);
    }

    #[test]
    fn test_holds_still_under_target() {
        let session = session_with(&[(385.0, 300.0, 1)]);
        assert_eq!(demo_steering(&session), Steering::NONE);
    }
}
