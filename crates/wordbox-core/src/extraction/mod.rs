pub mod pdftohtml;
pub mod repair;

use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};

/// One run of text as emitted by the extraction tool, in its pixel units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextFragment {
    pub font_ref: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Entity-escaped text as it appeared in the extraction output.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFontDescriptor {
    pub font_ref: String,
    pub family: String,
    pub size: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub number: u32,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub fonts: Vec<RawFontDescriptor>,
    #[serde(default)]
    pub fragments: Vec<RawTextFragment>,
}

/// Extraction result for a whole document, pages in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub pages: Vec<RawPage>,
}

/// Trait for PDF extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned text runs and font declarations from PDF bytes.
    fn extract(&self, pdf_bytes: &[u8]) -> Result<RawDocument, NormalizeError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
