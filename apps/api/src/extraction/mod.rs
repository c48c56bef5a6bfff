// Document text extraction.
// Two-stage strategy: prefer the embedded PDF text layer, fall back to
// page-image OCR only when the text layer yields nothing.

pub mod extractor;
pub mod ocr;
