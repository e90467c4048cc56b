//! Pointer output sinks.
//!
//! The pipeline emits [`ActionEvent`]s; a sink applies them to the
//! outside world. The OS injector lives behind the `inject` feature so
//! the core builds and tests everywhere; a printing sink covers dry
//! runs and a recording sink covers tests.

use crate::core::state_machine::ActionEvent;

#[cfg(feature = "inject")]
pub mod inject;

#[cfg(feature = "inject")]
pub use inject::EnigoSink;

/// Errors from applying an action to an output device.
#[derive(Debug)]
pub enum SinkError {
    InjectionFailed(String),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::InjectionFailed(e) => write!(f, "Injection failed: {e}"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Applies pointer-control actions to an output device.
///
/// Sink failures are reported but never fed back into control
/// decisions; the pipeline keeps running.
pub trait PointerSink {
    fn apply(&mut self, event: &ActionEvent) -> Result<(), SinkError>;
}

/// Prints actions to stdout instead of injecting them. Move events are
/// suppressed (30 per second would drown everything else).
#[derive(Debug, Default)]
pub struct PrintSink {
    /// Also print Move events
    pub verbose: bool,
}

impl PointerSink for PrintSink {
    fn apply(&mut self, event: &ActionEvent) -> Result<(), SinkError> {
        match event {
            ActionEvent::Move { x, y } => {
                if self.verbose {
                    println!("move {x:.1} {y:.1}");
                }
            }
            ActionEvent::ClickDown(button) => println!("down {button:?}"),
            ActionEvent::ClickUp(button) => println!("up {button:?}"),
            ActionEvent::ScrollDelta(delta) => println!("scroll {delta}"),
            ActionEvent::Exit => println!("exit"),
        }
        Ok(())
    }
}

/// Collects every applied action. Test instrumentation.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ActionEvent>,
}

impl PointerSink for RecordingSink {
    fn apply(&mut self, event: &ActionEvent) -> Result<(), SinkError> {
        self.events.push(event.clone());
        Ok(())
    }
}
