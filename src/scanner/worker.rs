//! Background builds with cancellation and progress reporting.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::error::Result;

use super::builder::build_with_options;
use super::node::FolderNode;
use super::options::ScanOptions;

/// Progress tracker shared between a running build and its observer.
#[derive(Debug, Default)]
pub struct ScanProgress {
    folders: AtomicU64,
    files: AtomicU64,
    last_folder: Mutex<Option<PathBuf>>,
}

impl ScanProgress {
    /// Create a new progress tracker.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_folder(&self, path: &Path) {
        self.folders.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_folder.lock() {
            *last = Some(path.to_path_buf());
        }
    }

    pub(crate) fn record_file(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    /// Folders completed so far.
    pub fn folders(&self) -> u64 {
        self.folders.load(Ordering::Relaxed)
    }

    /// Files counted so far.
    pub fn files(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }

    /// Most recently completed folder.
    pub fn last_folder(&self) -> Option<PathBuf> {
        self.last_folder.lock().ok().and_then(|last| last.clone())
    }
}

/// A build running on its own thread.
pub struct BuildHandle {
    cancel: Arc<AtomicBool>,
    progress: Arc<ScanProgress>,
    thread: JoinHandle<Result<FolderNode>>,
}

impl BuildHandle {
    /// Ask the build to stop at the next entry.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Flag that cancels this build when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn progress(&self) -> &ScanProgress {
        &self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the build to finish. A panic on the build thread is re-raised.
    pub fn join(self) -> Result<FolderNode> {
        self.thread
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
    }
}

/// Run a build on a background thread.
///
/// Any cancel flag or progress tracker already present in `options` is
/// reused; otherwise fresh ones are attached.
pub fn spawn_build(path: impl Into<PathBuf>, options: ScanOptions) -> BuildHandle {
    let path = path.into();
    let cancel = options
        .cancel
        .clone()
        .unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
    let progress = options
        .progress
        .clone()
        .unwrap_or_else(|| Arc::new(ScanProgress::new()));

    let options = options
        .with_cancel(Arc::clone(&cancel))
        .with_progress(Arc::clone(&progress));

    let thread = thread::spawn(move || build_with_options(&path, &options));

    BuildHandle {
        cancel,
        progress,
        thread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyError;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_structure() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        for i in 0..5 {
            let subdir = root.join(format!("dir{}", i));
            fs::create_dir(&subdir).unwrap();
            for j in 0..4 {
                File::create(subdir.join(format!("file{}.txt", j)))
                    .unwrap()
                    .write_all(b"content")
                    .unwrap();
            }
        }

        dir
    }

    #[test]
    fn test_spawned_build_matches_direct_build() {
        let dir = create_test_structure();

        let handle = spawn_build(dir.path(), ScanOptions::default());
        let mut background = handle.join().unwrap();
        let mut direct = crate::scanner::build(dir.path()).unwrap();
        background.sort_by_name();
        direct.sort_by_name();

        assert_eq!(background, direct);
        assert_eq!(background.total_size(), 5 * 4 * 7);
    }

    #[test]
    fn test_progress_counts_everything() {
        let dir = create_test_structure();

        let handle = spawn_build(dir.path(), ScanOptions::default());
        let progress = Arc::clone(&handle.progress);
        handle.join().unwrap();

        assert_eq!(progress.folders(), 6);
        assert_eq!(progress.files(), 20);
        assert_eq!(progress.last_folder().as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_pre_cancelled_build() {
        let dir = create_test_structure();
        let flag = Arc::new(AtomicBool::new(true));

        let handle = spawn_build(dir.path(), ScanOptions::new().with_cancel(flag));
        assert!(matches!(handle.join(), Err(TallyError::Cancelled)));
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let dir = create_test_structure();
        let flag = Arc::new(AtomicBool::new(false));

        let handle = spawn_build(dir.path(), ScanOptions::new().with_cancel(flag.clone()));
        handle.cancel();
        assert!(flag.load(Ordering::SeqCst));
        assert!(handle.cancel_flag().load(Ordering::SeqCst));

        // The build may have finished before the flag was seen
        match handle.join() {
            Ok(_) | Err(TallyError::Cancelled) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_root_reported_from_worker() {
        let handle = spawn_build("/nonexistent/path/12345", ScanOptions::default());
        assert!(matches!(
            handle.join(),
            Err(TallyError::InvalidDirectory(_))
        ));
    }
}
