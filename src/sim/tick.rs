//! Fixed timestep simulation tick
//!
//! One call advances the session by one reference frame: basket, pool
//! top-up, then catch/miss resolution.

use super::actor::{Steering, step_actor};
use super::autopilot::demo_steering;
use super::collision::resolve_frame;
use super::lifecycle::{Signal, apply_signal, enter_game_over, tick_game_over};
use super::state::{GameEvent, GamePhase, Session};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub moving_left: bool,
    /// Right arrow held
    pub moving_right: bool,
    /// Start/pause/resume pressed since the last tick
    pub confirm: bool,
    /// Restart requested since the last tick
    pub restart: bool,
    /// Idle/demo mode - autopilot steers the basket
    pub demo: bool,
}

impl TickInput {
    pub fn steering(&self) -> Steering {
        Steering {
            moving_left: self.moving_left,
            moving_right: self.moving_right,
        }
    }
}

/// Advance the session by one fixed timestep.
///
/// A tick that changes phase through a signal does nothing else, so pausing
/// and resuming never moves anything.
pub fn tick(session: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let mut changed = false;
    if input.restart {
        changed |= apply_signal(session, Signal::Restart).is_some();
    }
    if input.confirm {
        changed |= apply_signal(session, Signal::Confirm).is_some();
    }
    if changed {
        return events;
    }

    match session.phase {
        GamePhase::Running => {}
        GamePhase::GameOver { .. } => {
            tick_game_over(session, &mut events);
            return events;
        }
        GamePhase::Idle | GamePhase::AwaitingIdentity | GamePhase::Paused => return events,
    }

    session.time_ticks += 1;

    let steering = if input.demo {
        demo_steering(session)
    } else {
        input.steering()
    };
    step_actor(&mut session.actor, steering, session.config.arena.width);

    session.replenish();
    resolve_frame(session, &mut events);

    if session.ledger.is_out_of_lives() {
        enter_game_over(session, &mut events);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SessionIdentity;
    use crate::settings::GameConfig;
    use crate::sim::begin;
    use glam::Vec2;

    fn running_session(seed: u64) -> Session {
        let mut session = Session::new(GameConfig::default(), seed);
        apply_signal(&mut session, Signal::Confirm);
        begin(&mut session, SessionIdentity::new("p1", "Pat").unwrap());
        session
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut session = Session::new(GameConfig::default(), 1);
        let before = session.clone();
        let input = TickInput {
            moving_right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(tick(&mut session, &input).is_empty());
        }
        assert_eq!(session, before);
    }

    #[test]
    fn test_running_moves_objects_and_basket() {
        let mut session = running_session(1);
        let input = TickInput {
            moving_right: true,
            ..Default::default()
        };
        let before: Vec<f32> = session.pool.iter().map(|o| o.pos.y).collect();
        tick(&mut session, &input);
        assert_eq!(session.time_ticks, 1);
        assert_eq!(session.actor.velocity, 0.5);
        for (obj, y) in session.pool.iter().zip(before) {
            assert_eq!(obj.pos.y, y + obj.speed);
        }
    }

    #[test]
    fn test_tick_pause() {
        let mut session = running_session(3);
        tick(&mut session, &TickInput::default());

        let pause = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut session, &pause);
        assert_eq!(session.phase, GamePhase::Paused);
        let paused = session.clone();

        // Held keys do nothing while paused
        let held = TickInput {
            moving_left: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut session, &held);
        }

        tick(&mut session, &pause);
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.actor, paused.actor);
        assert_eq!(session.pool, paused.pool);
        assert_eq!(session.ledger, paused.ledger);
    }

    #[test]
    fn test_pool_stays_full_while_running() {
        let mut session = running_session(21);
        let input = TickInput {
            demo: true,
            ..Default::default()
        };
        for _ in 0..2_000 {
            tick(&mut session, &input);
            if session.phase != GamePhase::Running {
                break;
            }
            assert_eq!(session.pool.len(), session.config.max_active);
            assert!(session.ledger.lives <= session.config.max_lives);
        }
    }

    #[test]
    fn test_game_over_on_the_frame_lives_run_out() {
        let mut session = running_session(8);
        session.ledger.lives = 1;
        let mut objects = session.pool.take();
        objects[0].pos = Vec2::new(session.actor.x + 10.0, session.actor.y - objects[0].size);
        objects[0].score_delta = -5;
        session.pool.restore(objects);

        let events = tick(&mut session, &TickInput::default());
        assert!(session.phase.is_game_over());
        assert_eq!(session.ledger.lives, 0);
        assert!(events.contains(&GameEvent::GameOver {
            score: session.ledger.score
        }));
    }

    #[test]
    fn test_game_over_delay_then_reset_due() {
        let mut session = running_session(8);
        session.config.game_over_delay_ticks = 4;
        let mut events = Vec::new();
        enter_game_over(&mut session, &mut events);
        let frozen = session.pool.clone();

        let mut due = 0;
        for _ in 0..10 {
            let events = tick(
                &mut session,
                &TickInput {
                    confirm: true,
                    ..Default::default()
                },
            );
            due += events.iter().filter(|e| **e == GameEvent::ResetDue).count();
        }
        assert_eq!(due, 1);
        assert_eq!(session.pool, frozen);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed should produce identical results
        let mut a = running_session(99999);
        let mut b = running_session(99999);
        let inputs = [
            TickInput {
                moving_left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                demo: true,
                ..Default::default()
            },
        ];
        for _ in 0..200 {
            for input in &inputs {
                assert_eq!(tick(&mut a, input), tick(&mut b, input));
            }
        }
        assert_eq!(a, b);
    }
}
