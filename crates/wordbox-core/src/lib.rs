pub mod error;
pub mod extraction;
pub mod model;
pub mod normalize;

use error::NormalizeError;
use extraction::{PdfExtractor, RawDocument};
use model::Document;
pub use normalize::{NormalizeOptions, DEFAULT_RATIO};

/// Main API entry point: normalize a raw extraction into a [`Document`]
/// using the default pixel-to-point ratio.
///
/// `source_id` names the original input (usually its path) and is carried
/// through to the result unchanged.
pub fn normalize(raw: &RawDocument, source_id: &str) -> Result<Document, NormalizeError> {
    normalize_with(raw, source_id, &NormalizeOptions::default())
}

pub fn normalize_with(
    raw: &RawDocument,
    source_id: &str,
    options: &NormalizeOptions,
) -> Result<Document, NormalizeError> {
    normalize::assemble_document(raw, source_id, options)
}

/// Extract a PDF with the given backend, then normalize the result.
pub fn normalize_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    source_id: &str,
    options: &NormalizeOptions,
) -> Result<Document, NormalizeError> {
    tracing::debug!(backend = extractor.backend_name(), source = source_id, "extracting");
    let raw = extractor.extract(pdf_bytes)?;
    normalize_with(&raw, source_id, options)
}
