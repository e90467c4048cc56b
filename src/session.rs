//! Session statistics log.
//!
//! Tracks what the pipeline did over a control session - frames
//! processed and dropped, actions emitted - and persists cumulative
//! counts so `kinetic-pointer status` can report across runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Counters for the current session.
#[derive(Debug)]
pub struct SessionLog {
    /// Frames that carried a usable hand
    frames_processed: AtomicU64,
    /// Ticks with no hand or sub-threshold confidence
    frames_dropped: AtomicU64,
    /// Click down/up pairs emitted
    clicks_emitted: AtomicU64,
    /// Scroll events emitted
    scrolls_emitted: AtomicU64,
    /// Fail-safe exits triggered
    failsafe_exits: AtomicU64,
    /// Unique id for this session
    session_id: Uuid,
    /// Session start time
    session_start: DateTime<Utc>,
    /// Path for persisting stats
    persist_path: Option<PathBuf>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            frames_processed: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
            clicks_emitted: AtomicU64::new(0),
            scrolls_emitted: AtomicU64::new(0),
            failsafe_exits: AtomicU64::new(0),
            session_id: Uuid::new_v4(),
            session_start: Utc::now(),
            persist_path: None,
        }
    }

    /// Create a session log that accumulates onto previously saved stats.
    pub fn with_persistence(path: PathBuf) -> Self {
        let mut log = Self::new();
        log.persist_path = Some(path);

        if let Err(e) = log.load() {
            eprintln!("Note: Could not load previous session stats: {e}");
        }

        log
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn record_frame(&self) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_frame(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_click(&self) {
        self.clicks_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scroll(&self) {
        self.scrolls_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failsafe_exit(&self) {
        self.failsafe_exits.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.session_id,
            frames_processed: self.frames_processed.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            clicks_emitted: self.clicks_emitted.load(Ordering::Relaxed),
            scrolls_emitted: self.scrolls_emitted.load(Ordering::Relaxed),
            failsafe_exits: self.failsafe_exits.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Hand frames processed: {}\n\
             - Frames dropped (no hand / low confidence): {}\n\
             - Clicks emitted: {}\n\
             - Scroll events emitted: {}\n\
             - Fail-safe exits: {}\n\
             - Session duration: {} seconds",
            stats.frames_processed,
            stats.frames_dropped,
            stats.clicks_emitted,
            stats.scrolls_emitted,
            stats.failsafe_exits,
            stats.session_duration_secs
        )
    }

    /// Save stats to disk.
    pub fn save(&self) -> Result<(), String> {
        let path = match &self.persist_path {
            Some(p) => p,
            None => return Ok(()),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.stats()).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Load previously saved stats, accumulating them onto the counters.
    fn load(&self) -> Result<(), String> {
        let path = match &self.persist_path {
            Some(p) => p,
            None => return Ok(()),
        };

        if !path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        let stats: SessionStats = serde_json::from_str(&content).map_err(|e| e.to_string())?;

        self.frames_processed
            .fetch_add(stats.frames_processed, Ordering::Relaxed);
        self.frames_dropped
            .fetch_add(stats.frames_dropped, Ordering::Relaxed);
        self.clicks_emitted
            .fetch_add(stats.clicks_emitted, Ordering::Relaxed);
        self.scrolls_emitted
            .fetch_add(stats.scrolls_emitted, Ordering::Relaxed);
        self.failsafe_exits
            .fetch_add(stats.failsafe_exits, Ordering::Relaxed);

        Ok(())
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of session counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: Uuid,
    pub frames_processed: u64,
    pub frames_dropped: u64,
    pub clicks_emitted: u64,
    pub scrolls_emitted: u64,
    pub failsafe_exits: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// A session log that can be shared across threads.
pub type SharedSessionLog = Arc<SessionLog>;

/// Create a shared session log with persistence.
pub fn create_shared_log_with_persistence(path: PathBuf) -> SharedSessionLog {
    Arc::new(SessionLog::with_persistence(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let log = SessionLog::new();
        log.record_frame();
        log.record_frame();
        log.record_dropped_frame();
        log.record_click();

        let stats = log.stats();
        assert_eq!(stats.frames_processed, 2);
        assert_eq!(stats.frames_dropped, 1);
        assert_eq!(stats.clicks_emitted, 1);
        assert_eq!(stats.scrolls_emitted, 0);
    }

    #[test]
    fn test_save_and_reload_accumulates() {
        let path = std::env::temp_dir().join(format!("kinetic-session-{}.json", Uuid::new_v4()));

        let log = SessionLog::with_persistence(path.clone());
        log.record_frame();
        log.record_click();
        log.save().expect("save");

        let reloaded = SessionLog::with_persistence(path.clone());
        let stats = reloaded.stats();
        assert_eq!(stats.frames_processed, 1);
        assert_eq!(stats.clicks_emitted, 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_summary_mentions_all_counters() {
        let log = SessionLog::new();
        let summary = log.summary();
        assert!(summary.contains("frames processed"));
        assert!(summary.contains("Clicks emitted"));
        assert!(summary.contains("Fail-safe exits"));
    }
}
