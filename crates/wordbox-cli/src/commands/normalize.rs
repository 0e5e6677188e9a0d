use std::path::PathBuf;
use wordbox_core::error::NormalizeError;
use wordbox_core::extraction::RawDocument;
use wordbox_core::NormalizeOptions;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    ratio: f64,
    no_repair: bool,
) -> Result<(), NormalizeError> {
    let options = NormalizeOptions { ratio };
    let source_id = input_file.display().to_string();

    // Determine input type by extension
    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let document = if is_json {
        // Pre-captured extraction, e.g. from `wordbox extract`
        let json_bytes = std::fs::read(&input_file)?;
        let raw: RawDocument = serde_json::from_slice(&json_bytes)?;
        wordbox_core::normalize_with(&raw, &source_id, &options)?
    } else {
        let pdf_bytes = std::fs::read(&input_file)?;
        let extractor = super::extractor(no_repair);
        wordbox_core::normalize_pdf(&pdf_bytes, &extractor, &source_id, &options)?
    };

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&document)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Normalized {} page(s), {} word(s), written to {}",
                document.pages.len(),
                document.word_count(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&document)?,
            _ => output::table::print(&document),
        },
    }

    Ok(())
}
