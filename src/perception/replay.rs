//! Replay source: feeds recorded hand frames from a JSONL file.
//!
//! Each line is either a serialized [`HandFrame`] or the literal `null`
//! for a tick on which no hand was detected. Frames are paced at the
//! configured capture rate so a replayed session drives the pipeline at
//! realistic speed.

use crate::perception::types::HandFrame;
use crate::perception::{FrameSource, PerceptionError};
use std::path::Path;
use std::time::{Duration, Instant};

/// A [`FrameSource`] that replays a recorded JSONL session.
pub struct ReplaySource {
    ticks: std::vec::IntoIter<Option<HandFrame>>,
    tick_interval: Duration,
    next_tick: Option<Instant>,
    skipped_lines: usize,
}

impl ReplaySource {
    /// Open a recording. `fps = 0` disables pacing (frames are delivered
    /// as fast as the pipeline pulls them, useful for offline analysis).
    pub fn open(path: &Path, fps: u32) -> Result<Self, PerceptionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PerceptionError::Unavailable(format!("{}: {e}", path.display())))?;

        let mut ticks = Vec::new();
        let mut skipped_lines = 0;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Option<HandFrame>>(line) {
                Ok(tick) => ticks.push(tick),
                Err(_) => skipped_lines += 1,
            }
        }

        if skipped_lines > 0 {
            eprintln!("Replay: skipped {skipped_lines} malformed line(s)");
        }

        let tick_interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / fps
        };

        Ok(Self {
            ticks: ticks.into_iter(),
            tick_interval,
            next_tick: None,
            skipped_lines,
        })
    }

    /// Number of unparseable lines dropped when the file was loaded.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Remaining ticks in the recording.
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<HandFrame>, PerceptionError> {
        let tick = self.ticks.next().ok_or(PerceptionError::EndOfStream)?;

        if !self.tick_interval.is_zero() {
            let now = Instant::now();
            let due = self.next_tick.unwrap_or(now);
            if due > now {
                std::thread::sleep(due - now);
            }
            self.next_tick = Some(due.max(now) + self.tick_interval);
        }

        Ok(tick)
    }
}
