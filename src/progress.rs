//! Progress-callback trait for upload-lifecycle events.
//!
//! Inject an [`Arc<dyn UploadProgressCallback>`] via
//! [`crate::session::UploadSession::with_progress`] to receive real-time
//! events as a slot moves through its lifecycle.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a channel, a terminal spinner, or a UI store
//! without the library knowing anything about how the host renders. The
//! trait is `Send + Sync` so the two slots can report concurrently.
//! All methods have default no-op implementations so callers only override
//! what they care about.

use crate::document::{CandidateFile, DocumentKind};
use crate::error::RejectionReason;
use std::sync::Arc;

/// Called by an [`crate::session::UploadSession`] as its state changes.
///
/// Events carry plain data only — no rendering, no formatting decisions.
pub trait UploadProgressCallback: Send + Sync {
    /// A file passed validation and became the slot's selection.
    fn on_file_selected(&self, file: &CandidateFile) {
        let _ = file;
    }

    /// The selected file was removed by the user.
    fn on_file_removed(&self, file: &CandidateFile) {
        let _ = file;
    }

    /// An offering was refused; the slot's state did not change.
    fn on_rejected(&self, reason: &RejectionReason) {
        let _ = reason;
    }

    /// The slot entered `Submitting`; the collaborator is about to be
    /// invoked.
    fn on_submit_start(&self, file: &CandidateFile, kind: DocumentKind) {
        let _ = (file, kind);
    }

    /// The collaborator resolved successfully.
    ///
    /// `text_len` is the byte length of the returned text.
    fn on_submit_success(&self, text_len: usize) {
        let _ = text_len;
    }

    /// The collaborator resolved with a failure.
    fn on_submit_error(&self, error: &str) {
        let _ = error;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl UploadProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in
/// [`crate::session::UploadSession`].
pub type ProgressCallback = Arc<dyn UploadProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        selections: AtomicUsize,
        rejections: AtomicUsize,
        successes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl UploadProgressCallback for TrackingCallback {
        fn on_file_selected(&self, _file: &CandidateFile) {
            self.selections.fetch_add(1, Ordering::SeqCst);
        }

        fn on_rejected(&self, _reason: &RejectionReason) {
            self.rejections.fetch_add(1, Ordering::SeqCst);
        }

        fn on_submit_success(&self, _text_len: usize) {
            self.successes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_submit_error(&self, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        let file = CandidateFile::new("notes.pdf", 10, crate::document::PDF_MIME);
        cb.on_file_selected(&file);
        cb.on_file_removed(&file);
        cb.on_rejected(&RejectionReason::MultipleFiles);
        cb.on_submit_start(&file, DocumentKind::Handwritten);
        cb.on_submit_success(42);
        cb.on_submit_error("boom");
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            selections: AtomicUsize::new(0),
            rejections: AtomicUsize::new(0),
            successes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        };
        let file = CandidateFile::new("notes.pdf", 10, crate::document::PDF_MIME);

        tracker.on_file_selected(&file);
        tracker.on_rejected(&RejectionReason::WrongFileType);
        tracker.on_submit_success(5);
        tracker.on_submit_error("service unavailable");

        assert_eq!(tracker.selections.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.rejections.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.successes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_submit_success(128);
    }
}
