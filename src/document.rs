//! Document kinds and candidate-file metadata.
//!
//! ## Why MIME, not extension?
//!
//! Browsers and file pickers report a MIME type for every selected file, and
//! that report is what the service trusts. Validation therefore compares the
//! recorded `mime_type` against [`PDF_MIME`] exactly — no extension sniffing,
//! no content probing. [`CandidateFile::from_path`] fills the field via
//! `mime_guess` so CLI-side candidates carry the same metadata a picker
//! would have produced.

use crate::error::UploadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The only MIME type accepted for upload.
pub const PDF_MIME: &str = "application/pdf";

/// Size cap for handwritten uploads, in MiB.
///
/// Handwritten scans are typically direct camera captures that bloat
/// unnecessarily; textbook PDFs arrive pre-compressed and carry no cap.
pub const HANDWRITTEN_LIMIT_MB: u32 = 1;

const MIB: f64 = 1024.0 * 1024.0;

/// Which upload slot a file is destined for.
///
/// Fixed at session construction; selects the validation policy, the
/// display labels, and the service endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Scanned or photographed handwritten notes. Capped at
    /// [`HANDWRITTEN_LIMIT_MB`] MiB.
    Handwritten,
    /// Textbooks and previous-year question papers. No size cap.
    Textbook,
}

impl DocumentKind {
    /// Slot title as shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Handwritten => "Handwritten Notes",
            DocumentKind::Textbook => "Textbooks & PYQs",
        }
    }

    /// One-line upload hint for the slot.
    pub fn upload_hint(&self) -> &'static str {
        match self {
            DocumentKind::Handwritten => "Upload handwritten notes (Max 1MB)",
            DocumentKind::Textbook => "Upload textbooks or previous year questions",
        }
    }

    /// Size cap in MiB, if this kind carries one.
    pub fn size_limit_mb(&self) -> Option<u32> {
        match self {
            DocumentKind::Handwritten => Some(HANDWRITTEN_LIMIT_MB),
            DocumentKind::Textbook => None,
        }
    }

    /// Service endpoint path for this kind.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            DocumentKind::Handwritten => "/upload-handwritten",
            DocumentKind::Textbook => "/upload-textbook",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Handwritten => write!(f, "handwritten"),
            DocumentKind::Textbook => write!(f, "textbook"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "handwritten" => Ok(DocumentKind::Handwritten),
            "textbook" => Ok(DocumentKind::Textbook),
            other => Err(UploadError::InvalidConfig(format!(
                "Unknown document kind '{other}' (expected 'handwritten' or 'textbook')"
            ))),
        }
    }
}

/// Metadata for a file offered to an upload slot.
///
/// A candidate references a file the OS owns; the core only reads the
/// metadata during validation. `path` is the local source the HTTP
/// submitter uploads from — `None` for candidates built from raw metadata
/// (picker events, tests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// File name as reported by the picker or file system.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// MIME type as reported by the picker; authoritative for validation.
    pub mime_type: String,
    /// Local source path, when the candidate came from disk.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<PathBuf>,
}

impl CandidateFile {
    /// Build a candidate from raw metadata (no local source).
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            path: None,
        }
    }

    /// Build a candidate from a local file, validating existence and
    /// readability. The MIME type is guessed from the file name, which is
    /// what a picker would have reported.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref().to_path_buf();

        let metadata = match std::fs::metadata(&path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(UploadError::FileNotFound { path }),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(UploadError::PermissionDenied { path });
            }
            Err(_) => return Err(UploadError::FileNotFound { path }),
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let mime_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        tracing::debug!("Resolved candidate '{}' ({} bytes)", name, metadata.len());

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_type,
            path: Some(path),
        })
    }

    /// Size in MiB, unrounded. Used for the limit comparison.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / MIB
    }

    /// Size in MiB rounded to 2 decimal places. Used for display and for
    /// the `actual_mb` field of size rejections.
    pub fn size_mb_rounded(&self) -> f64 {
        (self.size_mb() * 100.0).round() / 100.0
    }

    /// Whether the recorded MIME type is exactly the PDF MIME type.
    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }
}
