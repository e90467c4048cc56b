//! Fail-safe exit monitor.
//!
//! Every other control is gesture-driven, so a misbehaving classifier
//! could lock the user out. Holding the cursor in the reserved top-left
//! corner for a sustained run of frames always terminates the pipeline,
//! deterministically and independently of gesture state.

use crate::core::region::ScreenPosition;

/// Watches the smoothed cursor position for the reserved exit corner.
#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    size_px: f64,
    required_frames: u32,
    frames_in_zone: u32,
}

impl SafetyMonitor {
    pub fn new(size_px: f64, required_frames: u32) -> Self {
        Self {
            size_px,
            required_frames,
            frames_in_zone: 0,
        }
    }

    /// Observe one tick. Returns true when the exit condition is met.
    /// A tick outside the corner (or with no position) resets the run.
    pub fn observe(&mut self, position: Option<ScreenPosition>) -> bool {
        let in_zone = position
            .map(|p| p.x < self.size_px && p.y < self.size_px)
            .unwrap_or(false);

        if in_zone {
            self.frames_in_zone += 1;
        } else {
            self.frames_in_zone = 0;
        }

        self.frames_in_zone >= self.required_frames
    }
}
