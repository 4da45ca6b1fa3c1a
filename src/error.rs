//! Error types for the pastpaper-extract library.
//!
//! Extraction itself is total: every input text produces an
//! [`crate::output::ExamModel`], possibly a mostly-empty one. Missing section
//! markers, absent questions, unmatched mark-scheme entries and unextractable
//! code all degrade to documented defaults inside the model.
//!
//! [`ExamError`] therefore only covers the edges of the pipeline: reading a
//! source document, validating configuration, and writing output. It is
//! returned from [`crate::extract::load_exam`] and friends; the pure
//! [`crate::extract::extract_exam`] never fails.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pastpaper-extract library.
#[derive(Debug, Error)]
pub enum ExamError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Source document was not found at the given path.
    #[error("Source document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file was read but is not valid UTF-8 text.
    #[error("Source document '{path}' is not UTF-8 text; extract the PDF to plain text first")]
    NotUtf8 { path: PathBuf },

    /// The source location is empty or otherwise unusable.
    #[error("Invalid source '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --fetch-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The exam model could not be serialised.
    #[error("Failed to serialise exam model: {0}")]
    Serialisation(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_timeout_display() {
        let e = ExamError::DownloadTimeout {
            url: "https://papers.example.org/m21.txt".into(),
            secs: 30,
        };
        let msg = e.to_string();
        assert!(msg.contains("30s"), "got: {msg}");
        assert!(msg.contains("m21.txt"));
    }

    #[test]
    fn file_not_found_display() {
        let e = ExamError::FileNotFound {
            path: PathBuf::from("papers/n19_p2.txt"),
        };
        assert!(e.to_string().contains("n19_p2.txt"));
    }

    #[test]
    fn invalid_config_display() {
        let e = ExamError::InvalidConfig("section start marker is empty".into());
        assert!(e.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn serialisation_error_converts() {
        let bad = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: ExamError = bad.into();
        assert!(matches!(e, ExamError::Serialisation(_)));
    }
}
