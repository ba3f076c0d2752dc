//! Fruit Catcher - a falling-object catcher arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (basket physics, spawning, catches, lifecycle)
//! - `game`: Host-facing driver tying the simulation to store, assets and input
//! - `renderer`: Rendering seam and HUD layout
//! - `platform`: Frame timing and input handling
//! - `leaderboard`: Player records and best-score persistence
//! - `settings`: Data-driven game configuration

pub mod assets;
pub mod error;
pub mod game;
pub mod identity;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetLoader, AssetMap, ColorAssets};
pub use error::{AssetLoadError, ConfigError, GameError, StoreError, ValidationError};
pub use game::Game;
pub use identity::{IdentityForm, SessionIdentity};
pub use leaderboard::{JsonStore, Leaderboard, MemoryBackend, PlayerRecord, PlayerStore};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep: one reference frame at 60 Hz
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame interval fed to the accumulator (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 100.0;
    pub const BASKET_HEIGHT: f32 = 20.0;
    pub const BASKET_FLOOR_OFFSET: f32 = 50.0;
    pub const BASKET_MAX_SPEED: f32 = 10.0;
    pub const BASKET_ACCELERATION: f32 = 0.5;
    pub const BASKET_FRICTION: f32 = 0.9;

    /// Session defaults
    pub const MAX_LIVES: u32 = 5;
    pub const MAX_ACTIVE_OBJECTS: usize = 3;
    pub const SPEED_JITTER: f32 = 5.0;
    /// Game over screen duration (2 seconds at 60 Hz)
    pub const GAME_OVER_DELAY_TICKS: u32 = 2 * 60;
}
