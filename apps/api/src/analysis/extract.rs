//! Text extraction for uploaded product documents (.txt, .pdf).

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Unable to read TXT file")]
    NotUtf8,

    #[error("Unable to read PDF: {0}")]
    Pdf(String),

    #[error("{0} has no readable text")]
    NoText(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let lower = file_name.trim().to_lowercase();
        if lower.ends_with(".txt") {
            Ok(DocumentKind::Text)
        } else if lower.ends_with(".pdf") {
            Ok(DocumentKind::Pdf)
        } else {
            Err(ExtractError::UnsupportedType(file_name.to_string()))
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DocumentKind::Text => "TXT",
            DocumentKind::Pdf => "PDF",
        }
    }
}

/// Pulls the text out of an uploaded file, chosen by its extension.
/// Text that is empty after trimming is an error.
pub async fn extract_text(file_name: &str, bytes: Vec<u8>) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_file_name(file_name)?;

    let text = match kind {
        DocumentKind::Text => String::from_utf8(bytes).map_err(|_| ExtractError::NotUtf8)?,
        // PDF parsing is CPU-bound and can panic on hostile input.
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractError::Pdf(e.to_string()))?
        .map_err(ExtractError::Pdf)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoText(kind.label()));
    }

    debug!(
        "Extracted {} chars from {} upload",
        text.chars().count(),
        kind.label()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_txt_upload_is_read_as_utf8() {
        let text = extract_text("Bottle.TXT", "reusable steel water bottle\n".into())
            .await
            .unwrap();
        assert_eq!(text, "reusable steel water bottle\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let err = extract_text("notes.txt", vec![0xff, 0xfe, 0x00])
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotUtf8));
    }

    #[tokio::test]
    async fn test_blank_document_is_rejected() {
        let err = extract_text("empty.txt", " \n\t ".into()).await.unwrap_err();
        assert!(matches!(err, ExtractError::NoText("TXT")));
        assert_eq!(err.to_string(), "TXT has no readable text");
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        for name in ["bottle.docx", "photo.png", "README"] {
            let err = extract_text(name, b"hello".to_vec()).await.unwrap_err();
            assert!(matches!(err, ExtractError::UnsupportedType(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_an_error() {
        let err = extract_text("catalog.pdf", b"definitely not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
