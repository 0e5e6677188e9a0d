use std::path::PathBuf;
use wordbox_core::error::NormalizeError;
use wordbox_core::extraction::PdfExtractor;

use crate::output;

pub fn run(input_file: PathBuf, no_repair: bool) -> Result<(), NormalizeError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let raw = super::extractor(no_repair).extract(&pdf_bytes)?;
    output::json::print(&raw)
}
