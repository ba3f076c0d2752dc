//! Game lifecycle state machine
//!
//! ```text
//! Idle ──confirm──▶ AwaitingIdentity ──submit──▶ Running ◀──confirm──▶ Paused
//!                          ▲                        │
//!                          └──── delay elapsed ◀── GameOver ◀── lives == 0
//! ```

use super::state::{GameEvent, GamePhase, Session};
use crate::identity::SessionIdentity;

/// A transition request from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Start / pause / resume key. Meaning depends on the phase.
    Confirm,
    /// Abandon the current session and reopen the identity form
    Restart,
}

/// Apply a signal. Returns the new phase if it changed.
///
/// Signals are ignored while the identity form is open and during the game
/// over delay.
pub fn apply_signal(session: &mut Session, signal: Signal) -> Option<GamePhase> {
    let from = session.phase;
    let to = match (signal, from) {
        (Signal::Confirm, GamePhase::Idle) => GamePhase::AwaitingIdentity,
        (Signal::Confirm, GamePhase::Running) => GamePhase::Paused,
        (Signal::Confirm, GamePhase::Paused) => GamePhase::Running,
        (Signal::Restart, GamePhase::Idle | GamePhase::Running | GamePhase::Paused) => {
            session.reset();
            log::info!("Session restarted from {:?}", from);
            return Some(session.phase);
        }
        _ => {
            log::debug!("Ignoring {:?} in {:?}", signal, from);
            return None;
        }
    };
    session.phase = to;
    log::info!("Phase {:?} -> {:?}", from, to);
    Some(to)
}

/// Start play once the player has identified themselves.
/// Returns false (and changes nothing) outside `AwaitingIdentity`.
pub fn begin(session: &mut Session, identity: SessionIdentity) -> bool {
    if session.phase != GamePhase::AwaitingIdentity {
        log::warn!("Identity submitted in {:?}, ignoring", session.phase);
        return false;
    }
    log::info!("Starting session for {} ({})", identity.name, identity.id);
    session.identity = Some(identity);
    session.phase = GamePhase::Running;
    true
}

/// Enter game over; the reset fires after the configured delay
pub fn enter_game_over(session: &mut Session, events: &mut Vec<GameEvent>) {
    let delay = session.config.game_over_delay_ticks;
    session.phase = GamePhase::GameOver {
        remaining_ticks: delay,
    };
    log::info!("Game over with score {}", session.ledger.score);
    events.push(GameEvent::GameOver {
        score: session.ledger.score,
    });
    if delay == 0 {
        events.push(GameEvent::ResetDue);
    }
}

/// Count down the game over delay. Emits `ResetDue` exactly once, on the
/// tick the delay runs out.
pub fn tick_game_over(session: &mut Session, events: &mut Vec<GameEvent>) {
    if let GamePhase::GameOver { remaining_ticks } = session.phase {
        match remaining_ticks {
            0 => {}
            1 => {
                session.phase = GamePhase::GameOver { remaining_ticks: 0 };
                events.push(GameEvent::ResetDue);
            }
            n => session.phase = GamePhase::GameOver { remaining_ticks: n - 1 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    fn session() -> Session {
        Session::new(GameConfig::default(), 5)
    }

    fn identity() -> SessionIdentity {
        SessionIdentity::new("p1", "Pat").unwrap()
    }

    #[test]
    fn test_full_lifecycle() {
        let mut s = session();
        assert_eq!(apply_signal(&mut s, Signal::Confirm), Some(GamePhase::AwaitingIdentity));
        // Confirm does nothing while the form is open
        assert_eq!(apply_signal(&mut s, Signal::Confirm), None);
        assert!(begin(&mut s, identity()));
        assert_eq!(s.phase, GamePhase::Running);
        assert_eq!(apply_signal(&mut s, Signal::Confirm), Some(GamePhase::Paused));
        assert_eq!(apply_signal(&mut s, Signal::Confirm), Some(GamePhase::Running));

        let mut events = Vec::new();
        enter_game_over(&mut s, &mut events);
        assert_eq!(s.phase, GamePhase::GameOver { remaining_ticks: 120 });
        assert_eq!(events, vec![GameEvent::GameOver { score: 0 }]);
    }

    #[test]
    fn test_begin_only_from_awaiting_identity() {
        let mut s = session();
        assert!(!begin(&mut s, identity()));
        assert_eq!(s.phase, GamePhase::Idle);
        assert!(s.identity.is_none());
    }

    #[test]
    fn test_game_over_ignores_signals() {
        let mut s = session();
        let mut events = Vec::new();
        enter_game_over(&mut s, &mut events);
        assert_eq!(apply_signal(&mut s, Signal::Confirm), None);
        assert_eq!(apply_signal(&mut s, Signal::Restart), None);
        assert!(s.phase.is_game_over());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut s = session();
        apply_signal(&mut s, Signal::Confirm);
        begin(&mut s, identity());
        s.ledger.score = 9;
        assert_eq!(apply_signal(&mut s, Signal::Restart), Some(GamePhase::AwaitingIdentity));
        assert_eq!(s.ledger.score, 0);
        assert!(s.identity.is_none());
    }

    #[test]
    fn test_reset_due_fires_once() {
        let mut s = session();
        s.config.game_over_delay_ticks = 3;
        let mut events = Vec::new();
        enter_game_over(&mut s, &mut events);
        events.clear();
        for _ in 0..10 {
            tick_game_over(&mut s, &mut events);
        }
        assert_eq!(events, vec![GameEvent::ResetDue]);
        assert_eq!(s.phase, GamePhase::GameOver { remaining_ticks: 0 });
    }
}
