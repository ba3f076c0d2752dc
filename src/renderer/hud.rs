//! HUD layout shared by renderers

use glam::Vec2;

use crate::sim::GamePhase;

/// Size of a life heart (pixels)
pub const HEART_SIZE: f32 = 30.0;
/// Horizontal distance between hearts
pub const HEART_SPACING: f32 = 40.0;
/// Hearts start this far from the arena's right edge
const HEARTS_RIGHT_INSET: f32 = 200.0;
const HEARTS_Y: f32 = 30.0;

/// Centered overlay text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
}

impl Banner {
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Idle => Some(Self {
                title: "Press Space to Start",
                subtitle: None,
            }),
            GamePhase::Paused => Some(Self {
                title: "Paused",
                subtitle: Some("Press Space to resume"),
            }),
            GamePhase::GameOver { .. } => Some(Self {
                title: "Game Over",
                subtitle: Some("Saving score..."),
            }),
            GamePhase::AwaitingIdentity | GamePhase::Running => None,
        }
    }
}

/// Anchor points for one heart per remaining life
pub fn heart_positions(lives: u32, arena_width: f32) -> Vec<Vec2> {
    let start_x = arena_width - HEARTS_RIGHT_INSET;
    (0..lives)
        .map(|i| Vec2::new(start_x + i as f32 * HEART_SPACING, HEARTS_Y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_positions() {
        let hearts = heart_positions(3, 800.0);
        assert_eq!(
            hearts,
            vec![Vec2::new(600.0, 30.0), Vec2::new(640.0, 30.0), Vec2::new(680.0, 30.0)]
        );
        assert!(heart_positions(0, 800.0).is_empty());
    }

    #[test]
    fn test_banner_only_when_not_playing() {
        assert!(Banner::for_phase(GamePhase::Running).is_none());
        assert!(Banner::for_phase(GamePhase::AwaitingIdentity).is_none());
        assert_eq!(
            Banner::for_phase(GamePhase::GameOver { remaining_ticks: 3 }).map(|b| b.title),
            Some("Game Over")
        );
    }
}
