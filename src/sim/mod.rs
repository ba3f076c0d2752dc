//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable pool order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod catalog;
pub mod collision;
pub mod lifecycle;
pub mod spawner;
pub mod state;
pub mod tick;

pub use actor::{Steering, step_actor};
pub use autopilot::demo_steering;
pub use catalog::{CatalogEntry, DEFAULT_CATALOG, ObjectKind};
pub use collision::{Outcome, Resolution, classify, resolve_frame};
pub use lifecycle::{Signal, apply_signal, begin};
pub use spawner::{HAZARD_SPEED_MULTIPLIER, ObjectPool, Spawner};
pub use state::{Actor, FallingObject, GameEvent, GamePhase, ScoreLedger, Session};
pub use tick::{TickInput, tick};
