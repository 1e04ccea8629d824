//! # notes2text
//!
//! Submit one PDF — handwritten notes or a textbook/PYQ file — to a remote
//! OCR/cleanup service and retrieve the transcribed text.
//!
//! ## Why this crate?
//!
//! The interesting part of an upload flow is never the HTTP call; it is the
//! bookkeeping around it. Which files may become the selection? What happens
//! when the user drops three files, or a PNG, or a 40 MB scan? What may the
//! user do while a submission is in flight? This crate isolates exactly that
//! logic — validation policy and the selection/submission state machine — so
//! hosts (a CLI, a desktop shell, a web view) only render state and never
//! re-implement the rules.
//!
//! ## Flow Overview
//!
//! ```text
//! files from drop/picker
//!  │
//!  ├─ 1. validate   cardinality → type → per-kind size cap (pure)
//!  ├─ 2. select     UploadSession: Empty → Selected
//!  ├─ 3. submit     Selected → Submitting, collaborator invoked once
//!  └─ 4. settle     text handed to the caller; slot back to Empty
//! ```
//!
//! Two slots exist — one per [`DocumentKind`] — and each is an independent
//! [`UploadSession`]. Handwritten uploads are capped at 1 MiB; textbook
//! uploads carry no cap.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notes2text::{
//!     CandidateFile, ClientConfig, DocumentKind, HttpSubmitter, UploadSession,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = UploadSession::new(DocumentKind::Handwritten);
//!     let file = CandidateFile::from_path("notes.pdf")?;
//!     session.offer_files(std::slice::from_ref(&file))?;
//!
//!     let submitter = HttpSubmitter::new(ClientConfig::default())?;
//!     let transcript = session.submit(&submitter).await?;
//!     println!("{}", transcript.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `notes2text` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! notes2text = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod document;
pub mod error;
pub mod progress;
pub mod session;
pub mod submit;
pub mod validate;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{ClientConfig, ClientConfigBuilder, HttpSubmitter};
pub use document::{CandidateFile, DocumentKind, HANDWRITTEN_LIMIT_MB, PDF_MIME};
pub use error::{RejectionReason, UploadError};
pub use progress::{NoopProgressCallback, ProgressCallback, UploadProgressCallback};
pub use session::{FailurePolicy, SessionState, UploadSession};
pub use submit::{Submitter, Transcript};
pub use validate::{validate, ValidationResult};
