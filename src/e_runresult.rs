use crate::prelude::*;

/// Outcome of one pipeline run.
///
/// `passed` starts out true and only ever flips to false; it is read once
/// when the run finishes. Checks may record into it from several workers.
#[derive(Debug)]
pub struct RunResult {
    passed: AtomicBool,
    checked: AtomicUsize,
    files_with_errors: AtomicUsize,
    check_failures: AtomicUsize,
}

impl Default for RunResult {
    fn default() -> Self {
        RunResult {
            passed: AtomicBool::new(true),
            checked: AtomicUsize::new(0),
            files_with_errors: AtomicUsize::new(0),
            check_failures: AtomicUsize::new(0),
        }
    }
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> bool {
        self.passed.load(Ordering::SeqCst)
    }

    pub fn record_checked(&self) {
        self.checked.fetch_add(1, Ordering::Relaxed);
    }

    /// A file still had diagnostics after filtering.
    pub fn record_errors(&self) {
        self.files_with_errors.fetch_add(1, Ordering::Relaxed);
        self.passed.store(false, Ordering::SeqCst);
    }

    /// The checker could not produce a report for a file.
    pub fn record_failure(&self) {
        self.check_failures.fetch_add(1, Ordering::Relaxed);
        self.passed.store(false, Ordering::SeqCst);
    }

    pub fn checked(&self) -> usize {
        self.checked.load(Ordering::Relaxed)
    }

    pub fn files_with_errors(&self) -> usize {
        self.files_with_errors.load(Ordering::Relaxed)
    }

    pub fn check_failures(&self) -> usize {
        self.check_failures.load(Ordering::Relaxed)
    }
}
