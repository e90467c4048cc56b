//! Exponential moving-average cursor smoothing.
//!
//! Each tick moves the smoothed position a fixed fraction of the way
//! toward the raw position: `smoothed' = smoothed + (raw - smoothed) / k`.
//! The step is bounded, monotonic toward the target, and never
//! overshoots. The first observation after a reset initializes the
//! filter directly so the cursor does not drift in from a stale point.

use crate::core::region::ScreenPosition;

/// EMA filter over the cursor position. Holds the only session-spanning
/// position state in the pipeline.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    factor: f64,
    state: Option<ScreenPosition>,
}

impl CursorSmoother {
    /// `factor` is the EMA divisor `k >= 1`. `k = 1` passes raw input
    /// through unchanged.
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            state: None,
        }
    }

    /// Advance the filter by one observation.
    pub fn update(&mut self, raw: ScreenPosition) -> ScreenPosition {
        let next = match self.state {
            None => raw,
            Some(prev) => ScreenPosition {
                x: prev.x + (raw.x - prev.x) / self.factor,
                y: prev.y + (raw.y - prev.y) / self.factor,
            },
        };
        self.state = Some(next);
        next
    }

    /// Forget the current position. Called on hand loss so the filter
    /// re-initializes on reacquisition instead of sweeping across the
    /// screen from the last known point.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// The current smoothed position, if initialized.
    pub fn position(&self) -> Option<ScreenPosition> {
        self.state
    }
}
