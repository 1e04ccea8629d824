//! Error types for the notes2text library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`RejectionReason`] — **Recoverable, expected**: a candidate file did
//!   not pass validation (wrong type, too many files, over the size cap).
//!   The session state is untouched; the user picks another file and tries
//!   again. Each variant's `Display` is the exact user-facing message.
//!
//! * [`UploadError`] — **Operational**: a session operation was misused
//!   (submit with nothing selected, re-entrant submit), configuration was
//!   invalid, a local file could not be read, or the remote service failed.
//!   Returned as `Err(UploadError)` from session and submitter methods.
//!
//! The separation lets callers route validation feedback straight to the
//! user while handling operational failures (retry prompts, logging) in
//! their own flow.

use std::path::PathBuf;
use thiserror::Error;

/// Why a candidate file was refused at validation time.
///
/// Produced by [`crate::validate::validate`] and surfaced through
/// [`crate::session::UploadSession::offer_files`]. Session state is never
/// mutated when one of these is reported.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize, serde::Deserialize)]
pub enum RejectionReason {
    /// More (or fewer) than exactly one file was offered in a single event.
    #[error("Please upload only one file at a time")]
    MultipleFiles,

    /// The file's reported MIME type is not `application/pdf`.
    #[error("Please upload a PDF file only")]
    WrongFileType,

    /// The file exceeds the per-kind size cap. Only handwritten uploads
    /// carry a cap; `actual_mb` is pre-rounded to 2 decimal places.
    #[error("File size is {actual_mb:.2}MB. Handwritten notes must be under {limit_mb}MB.")]
    TooLarge { limit_mb: u32, actual_mb: f64 },
}

/// All operational errors returned by the notes2text library.
///
/// Validation outcomes use [`RejectionReason`] and are wrapped in
/// [`UploadError::Rejected`] when they cross the session boundary.
#[derive(Debug, Error)]
pub enum UploadError {
    // ── Validation ────────────────────────────────────────────────────────
    /// The offered file(s) failed validation; see the inner reason.
    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    // ── Session misuse ────────────────────────────────────────────────────
    /// `submit` was called while the session has no selected file.
    #[error("No file is selected for this slot")]
    NoFileSelected,

    /// A mutating operation was called while a submission is in flight.
    /// The collaborator is invoked at most once per selection.
    #[error("A submission is already in progress for this slot")]
    SubmissionInFlight,

    // ── Local file errors ─────────────────────────────────────────────────
    /// Candidate file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but reading its contents failed.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The candidate file carries no local source to upload from.
    #[error("Candidate file '{name}' has no local source; build it with CandidateFile::from_path")]
    NoLocalSource { name: String },

    // ── Submission errors ─────────────────────────────────────────────────
    /// The remote service rejected or failed to process the upload.
    /// `message` is human-readable and comes from the service's `error`
    /// field when present, otherwise from the transport layer.
    #[error("Failed to process file: {message}")]
    SubmissionFailed { message: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UploadError {
    /// The rejection reason, if this error wraps a validation outcome.
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            UploadError::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}
