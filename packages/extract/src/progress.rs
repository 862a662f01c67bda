//! Progress reporting for batch extraction.
//!
//! [`ProgressCallback`] keeps the extractor independent of how progress is
//! rendered (an `indicatif` bar in the CLI, nothing at all in tests).

/// Receives page-level progress from a batch run.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of pages.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` pages.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

