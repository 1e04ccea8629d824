//! CLI binary for notes2text.
//!
//! A thin shim over the library crate that maps CLI flags to a session and
//! an HTTP submitter, and prints the transcribed text.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use notes2text::{
    CandidateFile, ClientConfig, DocumentKind, HttpSubmitter, UploadSession,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Transcribe handwritten notes (stdout)
  notes2text notes.pdf

  # Textbook or previous-year-question PDF (no size cap)
  notes2text --kind textbook chapter3.pdf

  # Write the text to a file
  notes2text notes.pdf -o notes.txt

  # Point at a deployed service
  notes2text --endpoint https://notes.example.com notes.pdf

  # Include the raw OCR text before cleanup, when the service returns it
  notes2text --raw notes.pdf

UPLOAD RULES:
  Kind          Accepted      Size cap
  ───────────   ───────────   ────────
  handwritten   PDF only      1 MiB
  textbook      PDF only      none

ENVIRONMENT VARIABLES:
  NOTES2TEXT_ENDPOINT   Service base URL (same as --endpoint)
  RUST_LOG              Log filter, e.g. RUST_LOG=notes2text=debug
"#;

/// Transcribe handwritten-note and textbook PDFs via a remote OCR/cleanup service.
#[derive(Parser, Debug)]
#[command(
    name = "notes2text",
    version,
    about = "Transcribe handwritten-note and textbook PDFs via a remote OCR/cleanup service",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF to upload.
    file: PathBuf,

    /// Upload slot: 'handwritten' (1 MiB cap) or 'textbook'.
    #[arg(short, long, default_value = "handwritten")]
    kind: DocumentKind,

    /// Service base URL.
    #[arg(
        long,
        env = "NOTES2TEXT_ENDPOINT",
        default_value = notes2text::client::DEFAULT_BASE_URL
    )]
    endpoint: String,

    /// Whole-request timeout in seconds.
    #[arg(long, default_value_t = notes2text::client::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Write the transcribed text to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print the raw OCR text (before cleanup) to stderr, when the
    /// service returns it.
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let candidate = CandidateFile::from_path(&cli.file)?;
    let session = UploadSession::new(cli.kind);

    let accepted = session
        .offer_files(std::slice::from_ref(&candidate))
        .with_context(|| format!("'{}' was not accepted for upload", candidate.name))?;

    eprintln!(
        "{} {}  {}",
        bold(cli.kind.label()),
        accepted.name,
        dim(&format!("{:.2} MB", accepted.size_mb_rounded()))
    );

    let config = ClientConfig::builder()
        .base_url(&cli.endpoint)
        .timeout_secs(cli.timeout)
        .build()?;
    let submitter = HttpSubmitter::new(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Processing your file…");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = session.submit(&submitter).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{} {}", red("✘"), e);
            std::process::exit(1);
        }
    };

    if cli.raw {
        match &transcript.raw_text {
            Some(raw) => eprintln!("{}\n{raw}\n", dim("── raw OCR ──")),
            None => eprintln!("{}", dim("(service returned no raw OCR text)")),
        }
    }

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, &transcript.text)
                .await
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            eprintln!(
                "{} {} characters written to {}",
                green("✔"),
                transcript.text.chars().count(),
                bold(&path.display().to_string())
            );
        }
        None => {
            println!("{}", transcript.text);
            eprintln!(
                "{} {} characters transcribed from {}",
                green("✔"),
                transcript.text.chars().count(),
                bold(&accepted.name)
            );
        }
    }

    Ok(())
}
