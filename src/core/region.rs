//! Active-region remapping to screen coordinates.
//!
//! A configurable sub-rectangle of the camera view drives the full
//! screen, so reaching a screen edge needs only a modest hand excursion.
//! Input outside the region clamps to the nearest edge; the cursor can
//! never leave the screen bounds.

use crate::config::ActiveRegion;
use crate::core::normalize::NormalizedPosition;

/// A position in output (screen pixel) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Maps normalized capture coordinates through the active region onto
/// the screen.
#[derive(Debug, Clone)]
pub struct RegionMapper {
    region: ActiveRegion,
    screen_width: f64,
    screen_height: f64,
    mirror_x: bool,
}

impl RegionMapper {
    pub fn new(region: ActiveRegion, screen_width: u32, screen_height: u32, mirror_x: bool) -> Self {
        Self {
            region,
            screen_width: screen_width as f64,
            screen_height: screen_height as f64,
            mirror_x,
        }
    }

    /// Rescale a normalized position into screen pixels.
    pub fn map(&self, pos: NormalizedPosition) -> ScreenPosition {
        let mut x = ((pos.x - self.region.x_start) / self.region.width()).clamp(0.0, 1.0);
        let y = ((pos.y - self.region.y_start) / self.region.height()).clamp(0.0, 1.0);

        if self.mirror_x {
            x = 1.0 - x;
        }

        ScreenPosition {
            x: (x * self.screen_width).clamp(0.0, self.screen_width - 1.0),
            y: (y * self.screen_height).clamp(0.0, self.screen_height - 1.0),
        }
    }
}
