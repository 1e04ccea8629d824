//! Per-slot upload session: selection and submission lifecycle.
//!
//! One session owns one upload slot (one [`DocumentKind`]); the
//! handwritten and textbook slots are two independent instances with no
//! shared state. The lifecycle is a small state machine:
//!
//! ```text
//! Empty ──offer_files (accepted)──▶ Selected
//! Selected ──remove──▶ Empty
//! Selected ──submit──▶ Submitting
//! Submitting ──collaborator resolves──▶ Empty   (or Selected, by policy)
//! ```
//!
//! ## Single-flight
//!
//! `Submitting` is reachable only from `Selected`, and every mutating
//! operation is guarded by the current state: a second `submit`, an
//! `offer_files`, or a `remove` while a submission is in flight is refused
//! without invoking the collaborator. State lives behind a `std::sync`
//! mutex so a session can be shared across tasks; the lock is never held
//! across an await — the single-flight invariant comes from the state
//! guard, not from lock ownership.

use crate::document::{CandidateFile, DocumentKind};
use crate::error::UploadError;
use crate::progress::ProgressCallback;
use crate::submit::{Submitter, Transcript};
use crate::validate::{validate, ValidationResult};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Where a slot currently is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No file selected, nothing in flight.
    #[default]
    Empty,
    /// A validated file is selected, awaiting user action.
    Selected(CandidateFile),
    /// A submission for this file is in flight.
    Submitting(CandidateFile),
}

impl SessionState {
    /// Whether the slot holds no selection.
    pub fn is_empty(&self) -> bool {
        matches!(self, SessionState::Empty)
    }

    /// The file this state refers to, if any.
    pub fn file(&self) -> Option<&CandidateFile> {
        match self {
            SessionState::Empty => None,
            SessionState::Selected(file) | SessionState::Submitting(file) => Some(file),
        }
    }
}

/// What happens to the selection when a submission fails.
///
/// Whichever policy a host picks must be applied uniformly across its
/// slots; it is fixed per session at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return to `Empty`; the user re-selects a file to retry. (default)
    #[default]
    ClearSelection,
    /// Return to `Selected` with the same file so `submit` can be retried
    /// directly.
    RetainSelection,
}

/// One upload slot's selection/submission state machine.
///
/// # Example
/// ```rust
/// use notes2text::{CandidateFile, DocumentKind, UploadSession, PDF_MIME};
///
/// let session = UploadSession::new(DocumentKind::Handwritten);
/// let file = CandidateFile::new("notes.pdf", 500_000, PDF_MIME);
/// let accepted = session.offer_files(std::slice::from_ref(&file)).unwrap();
/// assert_eq!(accepted.name, "notes.pdf");
/// assert!(session.remove());
/// assert!(session.state().is_empty());
/// ```
pub struct UploadSession {
    kind: DocumentKind,
    failure_policy: FailurePolicy,
    state: Mutex<SessionState>,
    progress: Option<ProgressCallback>,
}

impl UploadSession {
    /// Create an empty session for one slot.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            failure_policy: FailurePolicy::default(),
            state: Mutex::new(SessionState::Empty),
            progress: None,
        }
    }

    /// Set what happens to the selection after a failed submission.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Attach a progress callback for lifecycle events.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// The slot's document kind.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Snapshot of the current state, as plain data.
    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    /// The currently selected (or in-flight) file, if any.
    pub fn selected_file(&self) -> Option<CandidateFile> {
        self.state.lock().unwrap().file().cloned()
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(*self.state.lock().unwrap(), SessionState::Submitting(_))
    }

    /// Offer the files from one drop or picker event.
    ///
    /// On acceptance the slot moves to `Selected` (replacing any previous
    /// selection) and the accepted file is returned. On rejection the state
    /// is untouched and the reason is returned — never silently dropped.
    /// While a submission is in flight the offering is refused without
    /// running validation.
    pub fn offer_files(&self, files: &[CandidateFile]) -> Result<CandidateFile, UploadError> {
        let mut state = self.state.lock().unwrap();
        if matches!(*state, SessionState::Submitting(_)) {
            warn!("{}: file offered while a submission is in flight", self.kind);
            return Err(UploadError::SubmissionInFlight);
        }

        match validate(files, self.kind) {
            ValidationResult::Accepted(file) => {
                *state = SessionState::Selected(file.clone());
                drop(state);
                debug!(
                    "{}: selected '{}' ({:.2} MB)",
                    self.kind,
                    file.name,
                    file.size_mb_rounded()
                );
                if let Some(cb) = &self.progress {
                    cb.on_file_selected(&file);
                }
                Ok(file)
            }
            ValidationResult::Rejected(reason) => {
                drop(state);
                warn!("{}: offering rejected: {}", self.kind, reason);
                if let Some(cb) = &self.progress {
                    cb.on_rejected(&reason);
                }
                Err(reason.into())
            }
        }
    }

    /// Remove the selected file, returning the slot to `Empty`.
    ///
    /// Valid only from `Selected`; from any other state this is a no-op
    /// returning `false`.
    pub fn remove(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        match std::mem::take(&mut *state) {
            SessionState::Selected(file) => {
                drop(state);
                debug!("{}: removed '{}'", self.kind, file.name);
                if let Some(cb) = &self.progress {
                    cb.on_file_removed(&file);
                }
                true
            }
            other => {
                // take() already wrote Empty; put the original back.
                *state = other;
                false
            }
        }
    }

    /// Force the slot back to `Empty` from any state.
    ///
    /// This is the host-level reset, and the escape hatch if a `submit`
    /// future was cancelled while in flight.
    pub fn clear(&self) {
        *self.state.lock().unwrap() = SessionState::Empty;
    }

    /// Submit the selected file through `submitter` and await the result.
    ///
    /// Valid only from `Selected`: from `Empty` this returns
    /// [`UploadError::NoFileSelected`] and from `Submitting` it returns
    /// [`UploadError::SubmissionInFlight`] — in both guard cases the
    /// collaborator is not invoked and state is unchanged. Otherwise the
    /// slot moves to `Submitting`, the collaborator is invoked exactly
    /// once, and on resolution the slot settles back to `Empty` (or to
    /// `Selected` under [`FailurePolicy::RetainSelection`] after a
    /// failure). The slot is never left in `Submitting` once the
    /// collaborator has resolved.
    pub async fn submit(&self, submitter: &dyn Submitter) -> Result<Transcript, UploadError> {
        let file = {
            let mut state = self.state.lock().unwrap();
            let file = match &*state {
                SessionState::Empty => return Err(UploadError::NoFileSelected),
                SessionState::Submitting(_) => {
                    warn!("{}: submit called while already submitting", self.kind);
                    return Err(UploadError::SubmissionInFlight);
                }
                SessionState::Selected(file) => file.clone(),
            };
            *state = SessionState::Submitting(file.clone());
            file
        };

        info!("{}: submitting '{}'", self.kind, file.name);
        if let Some(cb) = &self.progress {
            cb.on_submit_start(&file, self.kind);
        }

        let outcome = submitter.submit(&file, self.kind).await;

        let mut state = self.state.lock().unwrap();
        match outcome {
            Ok(transcript) => {
                *state = SessionState::Empty;
                drop(state);
                info!(
                    "{}: submission complete, {} bytes of text",
                    self.kind,
                    transcript.text.len()
                );
                if let Some(cb) = &self.progress {
                    cb.on_submit_success(transcript.text.len());
                }
                Ok(transcript)
            }
            Err(err) => {
                *state = match self.failure_policy {
                    FailurePolicy::ClearSelection => SessionState::Empty,
                    FailurePolicy::RetainSelection => SessionState::Selected(file),
                };
                drop(state);
                warn!("{}: submission failed: {}", self.kind, err);
                if let Some(cb) = &self.progress {
                    cb.on_submit_error(&err.to_string());
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PDF_MIME;
    use crate::error::RejectionReason;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn notes_pdf() -> CandidateFile {
        CandidateFile::new("notes.pdf", 500_000, PDF_MIME)
    }

    struct MockSubmitter {
        succeed: bool,
        calls: AtomicUsize,
    }

    impl MockSubmitter {
        fn ok() -> Self {
            Self {
                succeed: true,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                succeed: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Submitter for MockSubmitter {
        async fn submit(
            &self,
            _file: &CandidateFile,
            _kind: DocumentKind,
        ) -> Result<Transcript, UploadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(Transcript::new("hello"))
            } else {
                Err(UploadError::SubmissionFailed {
                    message: "service unavailable".into(),
                })
            }
        }
    }

    #[test]
    fn offer_then_remove_round_trips_to_empty() {
        let session = UploadSession::new(DocumentKind::Handwritten);
        assert_eq!(session.state(), SessionState::Empty);

        session.offer_files(&[notes_pdf()]).unwrap();
        assert_eq!(session.state(), SessionState::Selected(notes_pdf()));

        assert!(session.remove());
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn offer_replaces_existing_selection() {
        let session = UploadSession::new(DocumentKind::Textbook);
        session.offer_files(&[notes_pdf()]).unwrap();

        let replacement = CandidateFile::new("book.pdf", 9_000_000, PDF_MIME);
        session
            .offer_files(std::slice::from_ref(&replacement))
            .unwrap();
        assert_eq!(session.selected_file(), Some(replacement));
    }

    #[test]
    fn rejected_offer_leaves_state_untouched() {
        let session = UploadSession::new(DocumentKind::Handwritten);
        session.offer_files(&[notes_pdf()]).unwrap();

        let err = session
            .offer_files(&[CandidateFile::new("scan.png", 100, "image/png")])
            .unwrap_err();
        assert_eq!(err.rejection(), Some(&RejectionReason::WrongFileType));
        // The earlier selection survives the rejected offering.
        assert_eq!(session.state(), SessionState::Selected(notes_pdf()));
    }

    #[test]
    fn rejected_offer_on_empty_session_stays_empty() {
        let session = UploadSession::new(DocumentKind::Handwritten);
        let files = [notes_pdf(), notes_pdf()];
        let err = session.offer_files(&files).unwrap_err();
        assert_eq!(err.rejection(), Some(&RejectionReason::MultipleFiles));
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn remove_from_empty_is_a_noop() {
        let session = UploadSession::new(DocumentKind::Handwritten);
        assert!(!session.remove());
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn submit_with_nothing_selected_does_not_invoke_collaborator() {
        let session = UploadSession::new(DocumentKind::Handwritten);
        let submitter = MockSubmitter::ok();

        let err = tokio_test::block_on(session.submit(&submitter)).unwrap_err();
        assert!(matches!(err, UploadError::NoFileSelected));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn successful_submit_returns_text_and_empties_slot() {
        // Scenario: collaborator resolves with "hello".
        let session = UploadSession::new(DocumentKind::Handwritten);
        session.offer_files(&[notes_pdf()]).unwrap();

        let submitter = MockSubmitter::ok();
        let transcript = tokio_test::block_on(session.submit(&submitter)).unwrap();
        assert_eq!(transcript.text, "hello");
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_submit_clears_selection_by_default() {
        let session = UploadSession::new(DocumentKind::Handwritten);
        session.offer_files(&[notes_pdf()]).unwrap();

        let submitter = MockSubmitter::failing();
        let err = tokio_test::block_on(session.submit(&submitter)).unwrap_err();
        assert!(matches!(err, UploadError::SubmissionFailed { .. }));
        // Never stuck in Submitting after the collaborator resolves.
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn failed_submit_retains_selection_under_retry_policy() {
        let session = UploadSession::new(DocumentKind::Handwritten)
            .with_failure_policy(FailurePolicy::RetainSelection);
        session.offer_files(&[notes_pdf()]).unwrap();

        let submitter = MockSubmitter::failing();
        tokio_test::block_on(session.submit(&submitter)).unwrap_err();
        assert_eq!(session.state(), SessionState::Selected(notes_pdf()));

        // The retained selection can be submitted again directly.
        let retry = MockSubmitter::ok();
        let transcript = tokio_test::block_on(session.submit(&retry)).unwrap();
        assert_eq!(transcript.text, "hello");
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn clear_forces_empty_from_selected() {
        let session = UploadSession::new(DocumentKind::Textbook);
        session.offer_files(&[notes_pdf()]).unwrap();
        session.clear();
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn state_snapshot_exposes_file() {
        let session = UploadSession::new(DocumentKind::Handwritten);
        session.offer_files(&[notes_pdf()]).unwrap();
        let state = session.state();
        assert_eq!(state.file().map(|f| f.name.as_str()), Some("notes.pdf"));
        assert!(!state.is_empty());
    }
}
