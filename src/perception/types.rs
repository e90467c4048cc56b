//! Hand frame types produced by the external perception sidecar.
//!
//! A frame carries the 21 landmarks of one detected hand in normalized
//! capture-frame coordinates, plus a detection confidence and timing.
//! Frames are immutable once created and live for one pipeline tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Landmark indices, following the common 21-point hand convention
/// (wrist, then four joints per digit from base to tip).
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;

    /// Number of landmarks in a complete hand frame.
    pub const COUNT: usize = 21;
}

/// A single hand keypoint in normalized 3D space.
///
/// Serialized on the wire as a bare `[x, y, z]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 2D Euclidean distance, ignoring depth. Gesture thresholds are
    /// defined in the camera plane.
    pub fn distance_2d(&self, other: &Landmark) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64, f64)> for Landmark {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<Landmark> for (f64, f64, f64) {
    fn from(lm: Landmark) -> Self {
        (lm.x, lm.y, lm.z)
    }
}

/// One capture tick's hand observation: 21 ordered landmarks plus
/// detection confidence and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandFrame {
    /// Monotonic sequence number assigned by the producer
    #[serde(default)]
    pub seq: u64,
    /// Capture timestamp (defaults to receipt time when absent)
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    /// The 21 hand landmarks, indexed per [`landmark`]
    pub landmarks: Vec<Landmark>,
}

impl HandFrame {
    pub fn new(seq: u64, confidence: f64, landmarks: Vec<Landmark>) -> Self {
        Self {
            seq,
            timestamp: Utc::now(),
            confidence,
            landmarks,
        }
    }

    /// Whether the frame carries the full landmark set. Short frames
    /// are treated as dropped, never indexed.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == landmark::COUNT
    }

    /// Get a landmark by index, or None for incomplete frames.
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        if self.is_complete() {
            self.landmarks.get(index)
        } else {
            None
        }
    }
}
