// Session metrics module
//
// Lightweight counters for what a session did, logged on shutdown

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Session-wide counters
///
/// Recording goes through `&self` so the session can share the instance
/// with the controller without extra plumbing.
#[derive(Debug)]
pub struct Metrics {
    /// Directory scans that completed
    pub scans: AtomicU64,

    /// Directory scans that failed
    pub scan_failures: AtomicU64,

    /// Toggle passes started
    pub toggle_passes: AtomicU64,

    /// Files rewritten across all passes
    pub files_toggled: AtomicU64,

    /// Files skipped because of read or write errors
    pub file_errors: AtomicU64,

    /// Passes cut short by a traversal error
    pub walk_errors: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            scans: AtomicU64::new(0),
            scan_failures: AtomicU64::new(0),
            toggle_passes: AtomicU64::new(0),
            files_toggled: AtomicU64::new(0),
            file_errors: AtomicU64::new(0),
            walk_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_scan(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan_failure(&self) {
        self.scan_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the totals of one toggle pass
    pub fn record_toggle_pass(&self, modified: usize, file_errors: usize, aborted: bool) {
        self.toggle_passes.fetch_add(1, Ordering::Relaxed);
        self.files_toggled.fetch_add(modified as u64, Ordering::Relaxed);
        self.file_errors.fetch_add(file_errors as u64, Ordering::Relaxed);
        if aborted {
            self.walk_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// One-line summary for the shutdown log
    pub fn summary(&self) -> String {
        format!(
            "Uptime: {:.1}s | Scans: {} ({} failed) | Toggle passes: {} | Files toggled: {} | File errors: {} | Aborted passes: {}",
            self.uptime().as_secs_f64(),
            self.scans.load(Ordering::Relaxed),
            self.scan_failures.load(Ordering::Relaxed),
            self.toggle_passes.load(Ordering::Relaxed),
            self.files_toggled.load(Ordering::Relaxed),
            self.file_errors.load(Ordering::Relaxed),
            self.walk_errors.load(Ordering::Relaxed),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.scans.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.toggle_passes.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_toggle_pass() {
        let metrics = Metrics::new();
        metrics.record_toggle_pass(3, 1, false);
        metrics.record_toggle_pass(2, 0, true);

        assert_eq!(metrics.toggle_passes.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.files_toggled.load(Ordering::Relaxed), 5);
        assert_eq!(metrics.file_errors.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.walk_errors.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_summary() {
        let metrics = Metrics::new();
        metrics.record_scan();
        metrics.record_scan_failure();
        let summary = metrics.summary();
        assert!(summary.contains("Scans: 1 (1 failed)"));
        assert!(summary.contains("Toggle passes: 0"));
    }
}
