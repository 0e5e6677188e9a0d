#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("text on page {page} references undeclared font '{font_ref}'")]
    UndeclaredFont { page: u32, font_ref: String },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftohtml not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftohtmlNotFound,

    #[error("pdftohtml failed with exit code {code}: {stderr}")]
    PdftohtmlFailed { code: i32, stderr: String },

    #[error("failed to parse extraction output: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
