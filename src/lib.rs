//! Kinetic Pointer - contactless hand-gesture pointer control.
//!
//! This library turns a stream of noisy hand-landmark observations
//! (produced by an external perception process) into stable pointer
//! events: smooth cursor movement, debounced clicks, and delta-based
//! scrolling.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Kinetic Pointer                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐           │
//! │  │ Perception │──▶│ Normalize  │──▶│  Region +  │           │
//! │  │  (frames)  │   │ (conf gate)│   │  Smoother  │           │
//! │  └────────────┘   └─────┬──────┘   └─────┬──────┘           │
//! │                         │                │                  │
//! │                         ▼                ▼                  │
//! │                  ┌────────────┐   ┌────────────┐            │
//! │                  │ Classifier │──▶│   State    │──▶ events  │
//! │                  │ (symbols)  │   │  Machine   │            │
//! │                  └────────────┘   └─────┬──────┘            │
//! │                                         │                   │
//! │                                   ┌─────┴──────┐            │
//! │                                   │  Fail-safe │            │
//! │                                   └────────────┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kinetic_pointer::{config::Config, core::PointerPipeline};
//!
//! let config = Config::default();
//! let mut pipeline = PointerPipeline::from_config(&config, 1920, 1080);
//!
//! // Frames come from a perception::FrameSource; None means no hand.
//! let events = pipeline.process(None);
//! assert!(events.is_empty());
//! ```

pub mod config;
pub mod core;
pub mod output;
pub mod perception;
pub mod session;

// Re-export key types at crate root for convenience
pub use config::{ActiveRegion, CaptureConfig, Config, ConfigError};
pub use crate::core::{
    ActionEvent, ActionStateMachine, ControlState, CursorSmoother, GestureClassifier,
    GestureSymbol, LandmarkNormalizer, MouseButton, PointerPipeline, RegionMapper, SafetyMonitor,
    ScreenPosition,
};
pub use output::{PointerSink, PrintSink, RecordingSink, SinkError};
pub use perception::{
    FrameSource, HandFrame, Landmark, PerceptionCollector, PerceptionError, PerceptionUpdate,
    ReplaySource, StdinSource,
};
pub use session::{SessionLog, SessionStats, SharedSessionLog};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gesture guide that can be displayed to users.
pub const GESTURE_GUIDE: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║               KINETIC POINTER - GESTURE GUIDE                    ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  MOVE ......... point with the index finger                      ║
║  LEFT CLICK ... touch thumb tip to index fingertip               ║
║  RIGHT CLICK .. touch thumb tip to middle fingertip              ║
║  SCROLL ....... make a fist and move the hand up or down         ║
║  EXIT ......... hold the cursor in the top-left corner,          ║
║                 or press Ctrl+C                                  ║
║                                                                  ║
║  Clicks and scrolling only engage after the gesture is held      ║
║  for a few consecutive frames, so a single misread frame will    ║
║  never fire an action.                                           ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_guide_contents() {
        assert!(GESTURE_GUIDE.contains("GESTURE GUIDE"));
        assert!(GESTURE_GUIDE.contains("LEFT CLICK"));
        assert!(GESTURE_GUIDE.contains("SCROLL"));
    }
}
