//! HTTP submitter: the production [`Submitter`] implementation.
//!
//! Speaks the processing service's wire contract: the file bytes go up as
//! a `multipart/form-data` POST under the field name `file`, to a path
//! chosen by [`DocumentKind`]. A successful response is JSON carrying
//! `text` (and optionally `raw_ocr`); failures are non-2xx responses whose
//! JSON body carries `error`. The submitter extracts exactly those fields
//! and interprets nothing else — OCR and cleanup happen entirely on the
//! service side.

use crate::document::{CandidateFile, DocumentKind};
use crate::error::UploadError;
use crate::submit::{Submitter, Transcript};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
///
/// OCR plus LLM cleanup of a dense scan routinely takes over a minute, so
/// the client waits far longer than a typical API call would.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for [`HttpSubmitter`], built via
/// [`ClientConfig::builder()`] or [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use notes2text::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://notes.example.com")
///     .timeout_secs(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service origin, e.g. `http://localhost:8000`. No trailing slash
    /// required; one is trimmed if present.
    pub base_url: String,

    /// Whole-request timeout in seconds. The core imposes no timeout of
    /// its own; this is the transport's policy.
    pub timeout_secs: u64,

    /// Endpoint path for handwritten uploads.
    pub handwritten_path: String,

    /// Endpoint path for textbook/PYQ uploads.
    pub textbook_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            handwritten_path: DocumentKind::Handwritten.endpoint_path().to_string(),
            textbook_path: DocumentKind::Textbook.endpoint_path().to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL for the given kind's upload endpoint.
    pub fn endpoint_for(&self, kind: DocumentKind) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = match kind {
            DocumentKind::Handwritten => &self.handwritten_path,
            DocumentKind::Textbook => &self.textbook_path,
        };
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn handwritten_path(mut self, path: impl Into<String>) -> Self {
        self.config.handwritten_path = path.into();
        self
    }

    pub fn textbook_path(mut self, path: impl Into<String>) -> Self {
        self.config.textbook_path = path.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, UploadError> {
        let c = &self.config;
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(UploadError::InvalidConfig(format!(
                "base_url must be an HTTP/HTTPS origin, got '{}'",
                c.base_url
            )));
        }
        if c.timeout_secs == 0 {
            return Err(UploadError::InvalidConfig(
                "timeout_secs must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

/// The fields of interest in a service response body. Success bodies carry
/// `text` (and `raw_ocr`), error bodies carry `error`; everything else
/// (e.g. the `success` flag) is ignored.
#[derive(Debug, Deserialize)]
struct ServiceResponse {
    text: Option<String>,
    raw_ocr: Option<String>,
    error: Option<String>,
}

/// reqwest-backed [`Submitter`].
///
/// One instance can serve both slots concurrently; the inner client is
/// cheap to clone and connection-pooled.
pub struct HttpSubmitter {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpSubmitter {
    /// Build a submitter from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UploadError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// The configuration this submitter was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(
        &self,
        file: &CandidateFile,
        kind: DocumentKind,
    ) -> Result<Transcript, UploadError> {
        let path = file.path.as_ref().ok_or_else(|| UploadError::NoLocalSource {
            name: file.name.clone(),
        })?;

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => UploadError::FileNotFound { path: path.clone() },
            std::io::ErrorKind::PermissionDenied => {
                UploadError::PermissionDenied { path: path.clone() }
            }
            _ => UploadError::FileRead {
                path: path.clone(),
                source: e,
            },
        })?;

        let url = self.config.endpoint_for(kind);
        info!(
            "Submitting '{}' ({:.2} MB) to {}",
            file.name,
            file.size_mb_rounded(),
            url
        );

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| UploadError::SubmissionFailed {
                message: format!("invalid MIME type '{}': {e}", file.mime_type),
            })?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UploadError::SubmissionFailed {
                        message: format!(
                            "request timed out after {}s",
                            self.config.timeout_secs
                        ),
                    }
                } else {
                    UploadError::SubmissionFailed {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::SubmissionFailed {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            // Error bodies are JSON {"error": "..."} when the service had a
            // chance to say anything; fall back to the status line.
            let message = serde_json::from_str::<ServiceResponse>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(UploadError::SubmissionFailed { message });
        }

        let parsed: ServiceResponse =
            serde_json::from_str(&body).map_err(|e| UploadError::SubmissionFailed {
                message: format!("invalid response body: {e}"),
            })?;

        match parsed.text {
            Some(text) => {
                debug!("Received {} bytes of text", text.len());
                Ok(Transcript {
                    text,
                    raw_text: parsed.raw_ocr,
                })
            }
            None => Err(UploadError::SubmissionFailed {
                message: parsed
                    .error
                    .unwrap_or_else(|| "response missing 'text' field".into()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_service_defaults() {
        let c = ClientConfig::default();
        assert_eq!(c.base_url, "http://localhost:8000");
        assert_eq!(c.timeout_secs, 120);
        assert_eq!(c.handwritten_path, "/upload-handwritten");
        assert_eq!(c.textbook_path, "/upload-textbook");
    }

    #[test]
    fn endpoint_for_joins_base_and_path() {
        let c = ClientConfig::default();
        assert_eq!(
            c.endpoint_for(DocumentKind::Handwritten),
            "http://localhost:8000/upload-handwritten"
        );
        assert_eq!(
            c.endpoint_for(DocumentKind::Textbook),
            "http://localhost:8000/upload-textbook"
        );
    }

    #[test]
    fn endpoint_for_tolerates_trailing_slash() {
        let c = ClientConfig::builder()
            .base_url("https://notes.example.com/")
            .build()
            .unwrap();
        assert_eq!(
            c.endpoint_for(DocumentKind::Handwritten),
            "https://notes.example.com/upload-handwritten"
        );
    }

    #[test]
    fn builder_rejects_non_http_base_url() {
        let err = ClientConfig::builder()
            .base_url("localhost:8000")
            .build()
            .unwrap_err();
        assert!(matches!(err, UploadError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_zero_timeout() {
        let err = ClientConfig::builder().timeout_secs(0).build().unwrap_err();
        assert!(matches!(err, UploadError::InvalidConfig(_)));
    }

    #[test]
    fn builder_overrides_endpoint_paths() {
        let c = ClientConfig::builder()
            .handwritten_path("api/v2/handwritten")
            .build()
            .unwrap();
        assert_eq!(
            c.endpoint_for(DocumentKind::Handwritten),
            "http://localhost:8000/api/v2/handwritten"
        );
    }

    #[test]
    fn service_response_parses_success_body() {
        let body = r#"{"success": true, "text": "clean", "raw_ocr": "messy"}"#;
        let parsed: ServiceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text.as_deref(), Some("clean"));
        assert_eq!(parsed.raw_ocr.as_deref(), Some("messy"));
        assert!(parsed.error.is_none());
    }

    #[test]
    fn service_response_parses_error_body() {
        let parsed: ServiceResponse =
            serde_json::from_str(r#"{"error": "No file provided"}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("No file provided"));
        assert!(parsed.text.is_none());
    }
}
