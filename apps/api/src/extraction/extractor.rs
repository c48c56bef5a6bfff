//! Extractor — best-effort plain-text rendering of an uploaded document.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::ocr::OcrEngine;

/// Two-stage extractor. The OCR backend is a trait object so the fallback
/// path can be exercised in tests without pdfium or tesseract installed.
pub struct Extractor {
    ocr: Arc<dyn OcrEngine>,
}

impl Extractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Extracts readable text from the document bytes.
    ///
    /// Tries the embedded text layer first; a document whose pages carry no
    /// extractable text (a scanned resume) falls through to page-image OCR.
    /// The result may still be empty when both stages find nothing — callers
    /// decide what an empty result means.
    pub async fn extract(&self, bytes: &[u8]) -> Result<String, AppError> {
        let text = text_layer(bytes)?;
        if !text.trim().is_empty() {
            debug!("text layer yielded {} chars", text.len());
            return Ok(text);
        }

        info!("no text layer found, falling back to OCR");
        self.ocr.recognize(bytes).await
    }
}

/// Direct text-layer extraction across all pages, newline-separated.
/// Malformed documents surface as a fatal extraction error.
fn text_layer(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("PDF text extraction failed: {e}")))
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::test_pdf::{blank_pdf, text_pdf};
    use super::*;

    /// OCR stub that records whether it ran and returns fixed text.
    struct RecordingOcr {
        text: String,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl OcrEngine for RecordingOcr {
        async fn recognize(&self, _pdf_bytes: &[u8]) -> Result<String, AppError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    fn extractor_with_ocr(text: &str) -> (Extractor, Arc<AtomicBool>) {
        let called = Arc::new(AtomicBool::new(false));
        let ocr = RecordingOcr {
            text: text.to_string(),
            called: called.clone(),
        };
        (Extractor::new(Arc::new(ocr)), called)
    }

    #[tokio::test]
    async fn test_text_layer_extraction_skips_ocr() {
        let (extractor, ocr_called) = extractor_with_ocr("should never appear");
        let pdf = text_pdf("Senior Rust Engineer with 7 years of experience");

        let text = extractor.extract(&pdf).await.unwrap();

        assert!(text.contains("Senior Rust Engineer"));
        assert!(!ocr_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_blank_document_falls_back_to_ocr() {
        let (extractor, ocr_called) = extractor_with_ocr("Recognized from page image");
        let pdf = blank_pdf();

        let text = extractor.extract(&pdf).await.unwrap();

        assert_eq!(text, "Recognized from page image");
        assert!(ocr_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_both_stages_empty_returns_empty_string() {
        let (extractor, ocr_called) = extractor_with_ocr("");
        let pdf = blank_pdf();

        let text = extractor.extract(&pdf).await.unwrap();

        assert!(text.is_empty());
        assert!(ocr_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_malformed_bytes_are_a_fatal_error() {
        let (extractor, _) = extractor_with_ocr("unused");

        let result = extractor.extract(b"this is not a pdf").await;

        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
