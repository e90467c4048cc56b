//! Stdin source: reads hand frames piped in by a perception sidecar.
//!
//! The sidecar (camera + landmark model) writes one JSON value per line:
//! a [`HandFrame`] when a hand is visible, `null` otherwise. Pacing comes
//! from the producer's capture rate; this source simply blocks on the
//! next line.

use crate::perception::types::HandFrame;
use crate::perception::{FrameSource, PerceptionError};
use std::io::{BufRead, BufReader, Stdin};

/// A [`FrameSource`] backed by the process's standard input.
pub struct StdinSource {
    reader: BufReader<Stdin>,
    line: String,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(std::io::stdin()),
            line: String::new(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for StdinSource {
    fn next_frame(&mut self) -> Result<Option<HandFrame>, PerceptionError> {
        self.line.clear();
        let bytes = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| PerceptionError::Unavailable(e.to_string()))?;

        if bytes == 0 {
            // EOF: the sidecar went away
            return Err(PerceptionError::EndOfStream);
        }

        let line = self.line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        // A malformed line is a dropped frame, not a fatal error; the
        // pipeline degrades to hand-lost for that tick.
        match serde_json::from_str::<Option<HandFrame>>(line) {
            Ok(tick) => Ok(tick),
            Err(_) => Ok(None),
        }
    }
}
