//! OCR fallback for documents without a text layer.
//!
//! Pages are rasterized through pdfium (system library binding) and handed to
//! the `tesseract` CLI one image at a time, in page order. Everything sits
//! behind the `OcrEngine` trait so the extractor and endpoint tests never
//! touch the native toolchain.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use pdfium_render::prelude::*;
use tokio::process::Command;
use tracing::debug;

use crate::errors::AppError;

/// Page raster width in pixels — roughly 200 DPI on US letter, enough for
/// tesseract while keeping per-page memory bounded.
const RENDER_TARGET_WIDTH: i32 = 1700;

/// Recognizes text in a document's rendered page images.
/// Carried in `AppState` (via `Extractor`) as `Arc<dyn OcrEngine>`.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Renders every page and recognizes text in page order, newline-joined.
    async fn recognize(&self, pdf_bytes: &[u8]) -> Result<String, AppError>;
}

/// Production OCR engine: pdfium rasterizer + tesseract CLI.
pub struct TesseractOcr {
    tesseract_path: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(tesseract_path: String, language: String) -> Self {
        Self {
            tesseract_path,
            language,
        }
    }

    /// Rasterizes every page to a PNG under `dir`, returning paths in page
    /// order. Synchronous — pdfium is not async-safe; callers run this under
    /// `spawn_blocking`.
    fn render_pages(pdf_bytes: &[u8], dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_system_library()
                .map_err(|e| AppError::Extraction(format!("failed to load pdfium: {e:?}")))?,
        );
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| AppError::Extraction(format!("failed to open PDF for rendering: {e}")))?;

        let render_config = PdfRenderConfig::new().set_target_width(RENDER_TARGET_WIDTH);

        let mut paths = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let image = page
                .render_with_config(&render_config)
                .map_err(|e| AppError::Extraction(format!("failed to render page {index}: {e}")))?
                .as_image();
            let path = dir.join(format!("page-{index:04}.png"));
            image
                .save(&path)
                .map_err(|e| AppError::Extraction(format!("failed to write page image: {e}")))?;
            paths.push(path);
        }
        Ok(paths)
    }

    async fn recognize_page(&self, image_path: &Path) -> Result<String, AppError> {
        let output = Command::new(&self.tesseract_path)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AppError::Extraction(format!("failed to run tesseract: {e}")))?;

        if !output.status.success() {
            return Err(AppError::Extraction(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, pdf_bytes: &[u8]) -> Result<String, AppError> {
        let temp_dir = tempfile::Builder::new()
            .prefix("resume-ocr-")
            .tempdir()
            .map_err(|e| AppError::Extraction(format!("failed to create OCR temp dir: {e}")))?;

        let bytes = pdf_bytes.to_vec();
        let dir = temp_dir.path().to_path_buf();
        let pages = tokio::task::spawn_blocking(move || Self::render_pages(&bytes, &dir))
            .await
            .map_err(|e| AppError::Extraction(format!("page render task failed: {e}")))??;

        debug!("rendered {} pages for OCR", pages.len());

        let mut text = String::new();
        for path in &pages {
            text.push_str(&self.recognize_page(path).await?);
            text.push('\n');
        }
        Ok(text)
    }
}
