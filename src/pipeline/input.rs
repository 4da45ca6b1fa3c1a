//! Source resolution: read a document's text from a local path or a URL.
//!
//! Both documents of an exam are plain text already extracted from the
//! original PDFs. A source that still holds PDF bytes (`%PDF` magic) or is not
//! valid UTF-8 is rejected with [`ExamError::NotUtf8`] rather than being fed
//! through the extractor as garbage.

use crate::error::ExamError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read the full text behind `location`.
pub async fn read_source(location: &str, timeout_secs: u64) -> Result<String, ExamError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(ExamError::InvalidInput {
            input: location.to_string(),
        });
    }
    if is_url(location) {
        download_text(location, timeout_secs).await
    } else {
        read_local(location).await
    }
}

async fn read_local(path_str: &str) -> Result<String, ExamError> {
    let path = PathBuf::from(path_str);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExamError::FileNotFound { path });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExamError::PermissionDenied { path });
        }
        Err(e) => {
            return Err(ExamError::Internal(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            )));
        }
    };

    let text = decode(bytes).ok_or_else(|| ExamError::NotUtf8 { path: path.clone() })?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

async fn download_text(url: &str, timeout_secs: u64) -> Result<String, ExamError> {
    info!("Fetching source text from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ExamError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let map_send_error = |e: reqwest::Error| {
        if e.is_timeout() {
            ExamError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ExamError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    };

    let response = client.get(url).send().await.map_err(map_send_error)?;

    if !response.status().is_success() {
        return Err(ExamError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response.bytes().await.map_err(map_send_error)?;
    let text = decode(bytes.to_vec()).ok_or_else(|| ExamError::DownloadFailed {
        url: url.to_string(),
        reason: "response body is not UTF-8 text".to_string(),
    })?;

    info!("Fetched {} bytes from {}", text.len(), url);
    Ok(text)
}

/// UTF-8 text of `bytes`, or `None` for PDF or otherwise binary content.
fn decode(bytes: Vec<u8>) -> Option<String> {
    if bytes.starts_with(PDF_MAGIC) {
        return None;
    }
    String::from_utf8(bytes).ok()
}
