//! Instantaneous gesture classification from hand geometry.
//!
//! A pure function of one frame: thumb-to-fingertip pinch distances and
//! a per-finger curl measure (fingertip-to-palm distance), evaluated in
//! a fixed priority order so exactly one symbol comes out per frame.

use crate::perception::types::{landmark, HandFrame};
use serde::{Deserialize, Serialize};

/// The discrete hand pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureSymbol {
    Neutral,
    /// Thumb tip touching the index fingertip (left click)
    PinchIndex,
    /// Thumb tip touching the middle fingertip (right click)
    PinchMiddle,
    /// All four fingers curled to the palm (scroll mode)
    Fist,
}

/// Stateless classifier; thresholds come from configuration.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    click_threshold: f64,
    curl_threshold: f64,
}

/// The four fingers checked for the fist, as (tip, name-free) indices.
const CURL_TIPS: [usize; 4] = [
    landmark::INDEX_TIP,
    landmark::MIDDLE_TIP,
    landmark::RING_TIP,
    landmark::PINKY_TIP,
];

impl GestureClassifier {
    pub fn new(click_threshold: f64, curl_threshold: f64) -> Self {
        Self {
            click_threshold,
            curl_threshold,
        }
    }

    /// Classify one frame into a gesture symbol.
    ///
    /// Priority is fixed: pinch-index beats pinch-middle beats fist, so
    /// a frame satisfying several proximity conditions still yields one
    /// deterministic symbol.
    pub fn classify(&self, frame: &HandFrame) -> GestureSymbol {
        if !frame.is_complete() {
            return GestureSymbol::Neutral;
        }

        let thumb = &frame.landmarks[landmark::THUMB_TIP];
        let index = &frame.landmarks[landmark::INDEX_TIP];
        let middle = &frame.landmarks[landmark::MIDDLE_TIP];

        if thumb.distance_2d(index) < self.click_threshold {
            return GestureSymbol::PinchIndex;
        }
        if thumb.distance_2d(middle) < self.click_threshold {
            return GestureSymbol::PinchMiddle;
        }
        if self.is_fist(frame) {
            return GestureSymbol::Fist;
        }
        GestureSymbol::Neutral
    }

    /// All four fingertips folded close to the palm (wrist landmark as
    /// the palm reference).
    fn is_fist(&self, frame: &HandFrame) -> bool {
        let palm = &frame.landmarks[landmark::WRIST];
        CURL_TIPS
            .iter()
            .all(|&tip| frame.landmarks[tip].distance_2d(palm) < self.curl_threshold)
    }
}
