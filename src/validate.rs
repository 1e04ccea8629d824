//! Upload validation: decide whether a dropped or picked file set may
//! become a slot's selection.
//!
//! ## Why a fixed check order?
//!
//! Exactly one reason is ever reported per offering, so the first violated
//! rule wins. The order is cardinality → type → size: a multi-file drop is
//! rejected before any per-file inspection, and a non-PDF is rejected
//! before its size matters. Validation is a pure function — same inputs,
//! same result, no side effects — which keeps it testable without any
//! event plumbing.

use crate::document::{CandidateFile, DocumentKind};
use crate::error::RejectionReason;

/// Outcome of validating one drop/picker event.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The single offered file passed every check and may become the
    /// slot's selection.
    Accepted(CandidateFile),
    /// The offering was refused; state must not change.
    Rejected(RejectionReason),
}

impl ValidationResult {
    /// Whether the offering was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            ValidationResult::Rejected(reason) => Some(reason),
            ValidationResult::Accepted(_) => None,
        }
    }

    /// Convert into a `Result` for `?`-style handling.
    pub fn into_result(self) -> Result<CandidateFile, RejectionReason> {
        match self {
            ValidationResult::Accepted(file) => Ok(file),
            ValidationResult::Rejected(reason) => Err(reason),
        }
    }
}

/// Validate the files from a single drop or picker event against the
/// policy for `kind`.
///
/// Exactly one file is the only accepted cardinality; an empty offering is
/// a caller bug and is treated as the same cardinality violation rather
/// than a panic. The MIME comparison is exact (see
/// [`crate::document::PDF_MIME`]); the size comparison uses the unrounded
/// MiB value while the reported `actual_mb` is rounded to 2 decimals.
pub fn validate(files: &[CandidateFile], kind: DocumentKind) -> ValidationResult {
    if files.len() != 1 {
        return ValidationResult::Rejected(RejectionReason::MultipleFiles);
    }

    let file = &files[0];

    if !file.is_pdf() {
        return ValidationResult::Rejected(RejectionReason::WrongFileType);
    }

    if let Some(limit_mb) = kind.size_limit_mb() {
        if file.size_mb() > f64::from(limit_mb) {
            return ValidationResult::Rejected(RejectionReason::TooLarge {
                limit_mb,
                actual_mb: file.size_mb_rounded(),
            });
        }
    }

    ValidationResult::Accepted(file.clone())
}
