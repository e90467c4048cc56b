//! Landmark normalization and confidence gating.
//!
//! Reduces one hand frame to the single 2D point the cursor follows
//! (the index fingertip), rejecting frames below the confidence floor
//! or with an incomplete landmark set.

use crate::perception::types::{landmark, HandFrame};

/// A 2D point in the normalized capture space, `[0, 1] x [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPosition {
    pub x: f64,
    pub y: f64,
}

/// Stateless confidence gate and fingertip extractor.
#[derive(Debug, Clone)]
pub struct LandmarkNormalizer {
    confidence_floor: f64,
}

impl LandmarkNormalizer {
    pub fn new(confidence_floor: f64) -> Self {
        Self { confidence_floor }
    }

    /// Derive the tracked position from a hand frame.
    ///
    /// Returns None when the frame is below the confidence floor or
    /// does not carry the full landmark set; the caller treats either
    /// case as "hand lost" for this tick.
    pub fn normalize(&self, frame: &HandFrame) -> Option<NormalizedPosition> {
        if frame.confidence < self.confidence_floor {
            return None;
        }
        let tip = frame.landmark(landmark::INDEX_TIP)?;
        Some(NormalizedPosition { x: tip.x, y: tip.y })
    }
}
