//! The submission collaborator seam.
//!
//! The session never constructs a network request itself. It hands the
//! selected file to a [`Submitter`] and surfaces whatever that collaborator
//! eventually resolves with — text on success, a human-readable message on
//! failure. Timeout, cancellation, and retry policy all live behind this
//! trait; the session performs none of them.
//!
//! [`crate::client::HttpSubmitter`] is the production implementation.
//! Tests swap in recording mocks.

use crate::document::{CandidateFile, DocumentKind};
use crate::error::UploadError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text returned by the processing service for one upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// The cleaned, display-ready text.
    pub text: String,
    /// The raw OCR text before cleanup, when the service includes it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub raw_text: Option<String>,
}

impl Transcript {
    /// A transcript with cleaned text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw_text: None,
        }
    }
}

/// Asynchronous submission collaborator.
///
/// Contract: `submit` resolves exactly once per call; a rejection carries a
/// human-readable message (typically [`UploadError::SubmissionFailed`]).
/// Implementations must be `Send + Sync` so one submitter can serve both
/// slots concurrently.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Upload `file` for processing as `kind` and await the resulting text.
    async fn submit(
        &self,
        file: &CandidateFile,
        kind: DocumentKind,
    ) -> Result<Transcript, UploadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_new_has_no_raw_text() {
        let t = Transcript::new("hello");
        assert_eq!(t.text, "hello");
        assert!(t.raw_text.is_none());
    }

    #[test]
    fn transcript_deserialises_without_raw_text() {
        let t: Transcript = serde_json::from_str(r#"{"text":"abc"}"#).unwrap();
        assert_eq!(t, Transcript::new("abc"));
    }
}
