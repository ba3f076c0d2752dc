//! Catch and miss resolution
//!
//! Each frame every falling object moves down by its speed and lands in
//! exactly one outcome. Caught is tested before missed.

use super::state::{Actor, FallingObject, GameEvent, ScoreLedger, Session};

/// Score lost when a reward reaches the floor
pub const MISSED_REWARD_PENALTY: i32 = 1;

/// Where an object stands after this frame's move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Caught,
    Missed,
    Falling,
}

/// Summary of one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub caught: u32,
    pub missed: u32,
    pub lives_lost: u32,
    /// Objects spawned to refill the pool
    pub replaced: usize,
}

/// Axis-aligned horizontal overlap between an object and the basket
#[inline]
pub fn overlaps_horizontally(obj: &FallingObject, actor: &Actor) -> bool {
    obj.pos.x + obj.size > actor.left() && obj.pos.x < actor.right()
}

/// Classify an object against the basket and the arena floor
pub fn classify(obj: &FallingObject, actor: &Actor, arena_height: f32) -> Outcome {
    if obj.bottom() >= actor.y && overlaps_horizontally(obj, actor) {
        Outcome::Caught
    } else if obj.bottom() > arena_height {
        Outcome::Missed
    } else {
        Outcome::Falling
    }
}

/// Apply a catch to the ledger. Returns true if a life was lost.
pub fn apply_catch(ledger: &mut ScoreLedger, obj: &FallingObject) -> bool {
    ledger.score += i64::from(obj.score_delta);
    if obj.is_hazard() && ledger.lives > 0 {
        ledger.lives -= 1;
        return true;
    }
    false
}

/// Apply a miss to the ledger. Returns the score penalty taken.
pub fn apply_miss(ledger: &mut ScoreLedger, obj: &FallingObject) -> i32 {
    if obj.is_reward() {
        ledger.score -= i64::from(MISSED_REWARD_PENALTY);
        MISSED_REWARD_PENALTY
    } else {
        0
    }
}

/// Move, classify and score every pooled object once, then refill the pool.
///
/// The pool is drained into a snapshot and the survivors are collected into
/// a fresh list, so removal never disturbs iteration. Replacements are
/// appended after the pass and are first classified next frame.
pub fn resolve_frame(session: &mut Session, events: &mut Vec<GameEvent>) -> Resolution {
    let arena_height = session.config.arena.height;
    let snapshot = session.pool.take();
    let mut survivors = Vec::with_capacity(snapshot.len());
    let mut resolution = Resolution::default();

    for mut obj in snapshot {
        obj.pos.y += obj.speed;

        match classify(&obj, &session.actor, arena_height) {
            Outcome::Falling => survivors.push(obj),
            Outcome::Caught => {
                resolution.caught += 1;
                log::debug!("Caught {} #{} ({:+})", obj.kind, obj.id, obj.score_delta);
                events.push(GameEvent::Caught {
                    id: obj.id,
                    kind: obj.kind,
                    score_delta: obj.score_delta,
                });
                if apply_catch(&mut session.ledger, &obj) {
                    resolution.lives_lost += 1;
                    events.push(GameEvent::LifeLost {
                        remaining: session.ledger.lives,
                    });
                }
            }
            Outcome::Missed => {
                resolution.missed += 1;
                let penalty = apply_miss(&mut session.ledger, &obj);
                log::debug!("Missed {} #{} (-{})", obj.kind, obj.id, penalty);
                events.push(GameEvent::Missed {
                    id: obj.id,
                    kind: obj.kind,
                    penalty,
                });
            }
        }
    }

    session.pool.restore(survivors);
    resolution.replaced = session.replenish();
    resolution
}
