use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::worker::ScanProgress;

/// Nesting depth at which a scan gives up. Far deeper than any real
/// hierarchy; reaching it usually means a followed symlink loops.
pub const DEFAULT_DEPTH_LIMIT: usize = 512;

/// Configuration options for building a folder tree.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Resolve symbolic links; when off a link counts as a file of its own length
    pub follow_symlinks: bool,

    /// Abort once folders nest deeper than this (root = depth 0)
    pub depth_limit: usize,

    /// Set from another thread to stop the scan early
    pub cancel: Option<Arc<AtomicBool>>,

    /// Shared counters updated while scanning
    pub progress: Option<Arc<ScanProgress>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            cancel: None,
            progress: None,
        }
    }
}

impl ScanOptions {
    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the nesting depth guard
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    /// Attach a cancellation flag
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Attach a progress tracker
    pub fn with_progress(mut self, progress: Arc<ScanProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ScanOptions::default();
        assert!(opts.follow_symlinks);
        assert_eq!(opts.depth_limit, DEFAULT_DEPTH_LIMIT);
        assert!(opts.cancel.is_none());
        assert!(opts.progress.is_none());
        assert!(!opts.is_cancelled());
    }

    #[test]
    fn test_scan_options_chaining() {
        let opts = ScanOptions::new()
            .with_follow_symlinks(false)
            .with_depth_limit(8);

        assert!(!opts.follow_symlinks);
        assert_eq!(opts.depth_limit, 8);
    }

    #[test]
    fn test_cancel_flag_is_observed() {
        let flag = Arc::new(AtomicBool::new(false));
        let opts = ScanOptions::new().with_cancel(flag.clone());
        assert!(!opts.is_cancelled());

        flag.store(true, Ordering::SeqCst);
        assert!(opts.is_cancelled());
    }
}
