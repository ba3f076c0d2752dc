//! Fixed timestep accumulator
//!
//! Turns variable display refresh intervals into whole simulation steps so
//! objects fall at the same speed on a 60 Hz and a 144 Hz screen.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed wall-clock seconds and return how many steps to run
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        // Negative after a clock adjustment, huge after a backgrounded tab
        self.accumulator += elapsed_secs.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }

    /// Leftover time not yet simulated (seconds)
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
