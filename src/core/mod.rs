//! Signal-conditioning and gesture-classification core.
//!
//! One hand frame per tick flows through normalization, region mapping,
//! and smoothing on the position path, and through the classifier and
//! the action state machine on the gesture path. The pipeline ties both
//! paths together and owns all session-spanning state.

pub mod classifier;
pub mod failsafe;
pub mod normalize;
pub mod pipeline;
pub mod region;
pub mod smoother;
pub mod state_machine;

pub use classifier::{GestureClassifier, GestureSymbol};
pub use failsafe::SafetyMonitor;
pub use normalize::{LandmarkNormalizer, NormalizedPosition};
pub use pipeline::PointerPipeline;
pub use region::{RegionMapper, ScreenPosition};
pub use smoother::CursorSmoother;
pub use state_machine::{ActionEvent, ActionStateMachine, ControlState, MouseButton};
