// Trailing-edge debounce for document rescans.
//
// Every qualifying edit restarts the window for its document (cancel and
// restart, never stacked), so at most one rescan fires per quiet period per
// document. Default window 300ms, clamped to 150–1000ms.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tagline_common::path::FileId;

/// Default rescan window.
const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Minimum allowed window.
const MIN_DEBOUNCE_MS: u64 = 150;
/// Maximum allowed window.
const MAX_DEBOUNCE_MS: u64 = 1000;

/// Configuration for the rescan debouncer.
#[derive(Debug, Clone)]
pub struct DebounceConfig {
    pub window: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { window: Duration::from_millis(DEFAULT_DEBOUNCE_MS) }
    }
}

impl DebounceConfig {
    /// Create a config with the given window in milliseconds, clamped to
    /// [150, 1000].
    pub fn with_millis(ms: u64) -> Self {
        let clamped = ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);
        Self { window: Duration::from_millis(clamped) }
    }
}

/// Tracks the last edit time per open document and reports which documents
/// have been quiet for a full window.
///
/// Call `edited()` on each document change, then `drain_ready()` to collect
/// the documents due for a rescan.
pub struct RescanDebouncer {
    config: DebounceConfig,
    pending: HashMap<FileId, Instant>,
}

impl RescanDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self { config, pending: HashMap::new() }
    }

    /// Record an edit. A pending rescan for this document restarts its
    /// window; it never stacks a second one.
    pub fn edited(&mut self, file: FileId) {
        self.edited_at(file, Instant::now());
    }

    /// Like `edited` but with a specific timestamp (for testing).
    fn edited_at(&mut self, file: FileId, now: Instant) {
        self.pending.insert(file, now);
    }

    /// Documents whose window has elapsed, removed from the pending set.
    pub fn drain_ready(&mut self) -> Vec<FileId> {
        self.drain_ready_at(Instant::now())
    }

    /// Like `drain_ready` but with a specific timestamp (for testing).
    fn drain_ready_at(&mut self, now: Instant) -> Vec<FileId> {
        let window = self.config.window;
        let mut ready = Vec::new();

        self.pending.retain(|file, last_edit| {
            if now.duration_since(*last_edit) >= window {
                ready.push(file.clone());
                false
            } else {
                true
            }
        });

        ready
    }

    /// The document was closed; drop any pending rescan for it.
    pub fn cancel(&mut self, file: &FileId) {
        self.pending.remove(file);
    }

    /// Number of documents still inside their window.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time at which the next pending rescan becomes due, or None if idle.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|last| *last + self.config.window).min()
    }
}
