//! Error types
//!
//! Nothing inside the simulation step can fail. Errors only come from the
//! edges: the identity form, asset loading, the player store and config.

use thiserror::Error;

use crate::sim::{GamePhase, ObjectKind};

/// Identity form submission was rejected. Recovered locally by showing the
/// message; the game phase does not change.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in both fields.")]
    MissingBoth,
    #[error("Please enter a player ID.")]
    MissingId,
    #[error("Please enter a player name.")]
    MissingName,
}

/// Asset loading failed. Fatal to session start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetLoadError {
    #[error("failed to load asset for {kind}: {reason}")]
    Failed { kind: ObjectKind, reason: String },
    #[error("no asset loaded for {0}")]
    Missing(ObjectKind),
}

/// Player store failures. Reads never surface these to the simulation;
/// they are logged and treated as an empty record list.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("player records are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Invalid game configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("friction must be in (0, 1] (got {0})")]
    Friction(f32),
    #[error("actor width {actor} does not fit in arena width {arena}")]
    ActorTooWide { actor: f32, arena: f32 },
    #[error("{kind} of size {size} does not fit in arena width {arena}")]
    ObjectTooWide {
        kind: ObjectKind,
        size: f32,
        arena: f32,
    },
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error("max_active must be at least 1")]
    EmptyPool,
    #[error("max_lives must be at least 1")]
    NoLives,
    #[error("basket floor offset {offset} puts it outside the arena")]
    FloorOffset { offset: f32 },
}

/// Anything that stops a game from being constructed or a session from
/// starting
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Assets(#[from] AssetLoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no player is being asked for (phase {0:?})")]
    NotAwaitingIdentity(GamePhase),
}
