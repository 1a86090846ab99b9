//! PDF text extraction.
//!
//! `pdf-extract` is synchronous and can panic on malformed input, so it runs on
//! the blocking pool; a panic surfaces as a `JoinError` and is reported like
//! any other unreadable upload.

use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

/// Extracts the text of a PDF. Fails with `Validation` when the bytes are not a
/// readable PDF or when the document contains no text.
pub async fn extract_pdf_text(data: Bytes, filename: &str) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation(format!("{filename} is empty")));
    }

    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            warn!("PDF extractor aborted on {filename}: {e}");
            AppError::Validation(format!("Could not read {filename} as a PDF"))
        })?
        .map_err(|e| AppError::Validation(format!("Could not read {filename} as a PDF: {e}")))?;

    let text = normalize_text(&extracted);
    if text.is_empty() {
        return Err(AppError::Validation(format!(
            "No text could be extracted from {filename}"
        )));
    }
    Ok(text)
}

/// Drops blank lines and trailing whitespace left between pages.
fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_drops_blank_lines() {
        let raw = "Page one  \n\n   \nPage two\n\u{c}\n";
        assert_eq!(normalize_text(raw), "Page one\nPage two");
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let result = extract_pdf_text(Bytes::new(), "plan.pdf").await;
        assert!(matches!(result, Err(AppError::Validation(m)) if m == "plan.pdf is empty"));
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_are_rejected() {
        let result = extract_pdf_text(Bytes::from_static(b"definitely not a pdf"), "notes.pdf").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
