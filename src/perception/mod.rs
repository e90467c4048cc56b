//! Perception input for Kinetic Pointer.
//!
//! The landmark-detection model is an external collaborator; this module
//! defines the frame types it produces, the sources frames arrive from
//! (a JSONL sidecar on stdin, or a recorded file for replay), and a
//! collector that pumps a source from a background thread into a bounded
//! channel for the pipeline loop.

pub mod replay;
pub mod stdin;
pub mod types;

// Re-export commonly used types
pub use replay::ReplaySource;
pub use stdin::StdinSource;
pub use types::{landmark, HandFrame, Landmark};

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// One message from the perception collector to the pipeline loop.
#[derive(Debug, Clone)]
pub enum PerceptionUpdate {
    /// A hand was observed this tick
    Frame(HandFrame),
    /// A capture tick passed with no usable hand
    HandLost,
    /// The source is exhausted (replay file end, stdin EOF)
    Closed,
}

/// Errors from perception sources and the collector.
#[derive(Debug)]
pub enum PerceptionError {
    /// The capture device or sidecar could not be acquired (fatal at startup)
    Unavailable(String),
    /// The source has no more frames to deliver
    EndOfStream,
    AlreadyRunning,
}

impl std::fmt::Display for PerceptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerceptionError::Unavailable(e) => write!(f, "Perception source unavailable: {e}"),
            PerceptionError::EndOfStream => write!(f, "Perception source exhausted"),
            PerceptionError::AlreadyRunning => write!(f, "Collector is already running"),
        }
    }
}

impl std::error::Error for PerceptionError {}

/// A synchronous, pull-based supplier of hand frames.
///
/// `Ok(None)` is a tick on which no hand was usable; end of input is
/// signalled with `Err(PerceptionError::EndOfStream)`.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<HandFrame>, PerceptionError>;
}

/// Pumps a [`FrameSource`] from a background thread into a bounded
/// channel, so the pipeline loop can block on `recv_timeout` and keep
/// processing strictly one frame at a time.
pub struct PerceptionCollector {
    sender: Sender<PerceptionUpdate>,
    receiver: Receiver<PerceptionUpdate>,
    running: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl PerceptionCollector {
    pub fn new() -> Self {
        // Bounded so a stalled consumer applies backpressure instead of
        // growing memory; at 30 Hz this is minutes of slack.
        let (sender, receiver) = bounded(4_096);
        Self {
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Start pumping frames from the given source in a background thread.
    pub fn start(
        &mut self,
        mut source: Box<dyn FrameSource + Send>,
    ) -> Result<(), PerceptionError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(PerceptionError::AlreadyRunning);
        }

        self.running.store(true, Ordering::SeqCst);

        let sender = self.sender.clone();
        let running = self.running.clone();

        let handle = thread::spawn(move || {
            'pump: while running.load(Ordering::SeqCst) {
                let update = match source.next_frame() {
                    Ok(Some(frame)) => PerceptionUpdate::Frame(frame),
                    Ok(None) => PerceptionUpdate::HandLost,
                    Err(PerceptionError::EndOfStream) => {
                        let _ = sender.send(PerceptionUpdate::Closed);
                        break;
                    }
                    Err(e) => {
                        eprintln!("Perception source error: {e}");
                        let _ = sender.send(PerceptionUpdate::Closed);
                        break;
                    }
                };
                // Re-check `running` while the channel is full so stop()
                // can always join this thread.
                let mut pending = update;
                loop {
                    match sender.send_timeout(pending, std::time::Duration::from_millis(100)) {
                        Ok(()) => break,
                        Err(crossbeam_channel::SendTimeoutError::Timeout(u)) => {
                            if !running.load(Ordering::SeqCst) {
                                break 'pump;
                            }
                            pending = u;
                        }
                        Err(crossbeam_channel::SendTimeoutError::Disconnected(_)) => break 'pump,
                    }
                }
            }
            running.store(false, Ordering::SeqCst);
        });

        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Stop the collector thread.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }

    /// Check if the collector is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for perception updates.
    pub fn receiver(&self) -> &Receiver<PerceptionUpdate> {
        &self.receiver
    }
}

impl Default for PerceptionCollector {
    fn default() -> Self {
        Self::new()
    }
}
