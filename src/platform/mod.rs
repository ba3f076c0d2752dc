//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (fixed timestep accumulator)
//! - Input events and focus gating

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Focus, InputState, Key, KeyEvent};
