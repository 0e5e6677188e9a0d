pub mod entities;
pub mod fonts;
pub mod geometry;
pub mod words;

use crate::error::NormalizeError;
use crate::extraction::{RawDocument, RawPage};
use crate::model::{Document, Page};
use fonts::{FontRegistry, FontTable};
use serde::{Deserialize, Serialize};
use words::build_word;

/// pdftohtml pixels to PDF points at its default 1.5x zoom.
pub const DEFAULT_RATIO: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Factor applied to every raw coordinate and dimension.
    pub ratio: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            ratio: DEFAULT_RATIO,
        }
    }
}

/// Build one page, keeping words in the order the extraction emitted them.
pub fn assemble_page(
    raw: &RawPage,
    fonts: &FontTable<'_>,
    registry: &mut FontRegistry,
    options: &NormalizeOptions,
) -> Result<Page, NormalizeError> {
    let mut words = Vec::with_capacity(raw.fragments.len());
    for fragment in &raw.fragments {
        if let Some(word) = build_word(raw.number, fragment, fonts, registry, options.ratio)? {
            words.push(word);
        }
    }

    tracing::debug!(
        page = raw.number,
        fragments = raw.fragments.len(),
        words = words.len(),
        "assembled page"
    );

    Ok(Page {
        number: raw.number,
        words,
        bbox: geometry::page_box(raw.width, raw.height, options.ratio),
    })
}

/// Build the document. One registry serves every page, so identical fonts
/// are shared across the whole document.
pub fn assemble_document(
    raw: &RawDocument,
    source_id: &str,
    options: &NormalizeOptions,
) -> Result<Document, NormalizeError> {
    let fonts = FontTable::from_pages(&raw.pages);
    let mut registry = FontRegistry::new();

    let pages = raw
        .pages
        .iter()
        .map(|page| assemble_page(page, &fonts, &mut registry, options))
        .collect::<Result<Vec<_>, _>>()?;

    let document = Document {
        pages,
        source_id: source_id.to_string(),
    };

    tracing::info!(
        source = source_id,
        pages = document.pages.len(),
        words = document.word_count(),
        fonts = registry.len(),
        "normalized document"
    );

    Ok(document)
}
