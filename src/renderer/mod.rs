//! Rendering seam
//!
//! The core never draws. Each frame the host's [`Renderer`] receives a
//! read-only [`FrameView`] of the session and draws it however it likes.

pub mod hud;

pub use hud::{Banner, heart_positions};

use crate::assets::AssetMap;
use crate::identity::SessionIdentity;
use crate::settings::ArenaConfig;
use crate::sim::{Actor, FallingObject, GamePhase, ScoreLedger, Session};

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a, H> {
    pub phase: GamePhase,
    pub arena: ArenaConfig,
    pub actor: &'a Actor,
    pub objects: &'a [FallingObject],
    pub ledger: &'a ScoreLedger,
    pub identity: Option<&'a SessionIdentity>,
    pub assets: &'a AssetMap<H>,
}

impl<'a, H> FrameView<'a, H> {
    pub fn new(session: &'a Session, assets: &'a AssetMap<H>) -> Self {
        Self {
            phase: session.phase,
            arena: session.config.arena,
            actor: &session.actor,
            objects: session.pool.as_slice(),
            ledger: &session.ledger,
            identity: session.identity.as_ref(),
            assets,
        }
    }

    /// Overlay text for the current phase
    pub fn banner(&self) -> Option<Banner> {
        Banner::for_phase(self.phase)
    }

    /// One-line HUD summary, for logs and text hosts
    pub fn hud_line(&self) -> String {
        let player = self.identity.map(|i| i.name.as_str()).unwrap_or("-");
        format!(
            "{:?} | {} | score {} | lives {}/{}",
            self.phase, player, self.ledger.score, self.ledger.lives, self.ledger.max_lives
        )
    }
}

/// Draws frames. Implemented by the host.
pub trait Renderer<H> {
    fn draw(&mut self, view: &FrameView<'_, H>);
}
