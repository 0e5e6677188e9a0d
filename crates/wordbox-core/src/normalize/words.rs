use crate::error::NormalizeError;
use crate::extraction::RawTextFragment;
use crate::model::Word;
use crate::normalize::entities::decode;
use crate::normalize::fonts::{FontRegistry, FontTable};
use crate::normalize::geometry::scale_fragment;

/// Turn one raw text run into a word.
///
/// Returns `Ok(None)` for runs without visible area or without text once
/// decoded and trimmed; pdftohtml emits plenty of those. A run whose font
/// is not declared anywhere in the document is an error.
pub fn build_word(
    page: u32,
    fragment: &RawTextFragment,
    fonts: &FontTable<'_>,
    registry: &mut FontRegistry,
    ratio: f64,
) -> Result<Option<Word>, NormalizeError> {
    let descriptor = fonts.require(page, &fragment.font_ref)?;
    let font = registry.resolve(descriptor);

    let bbox = scale_fragment(fragment, ratio);
    let content = decode(&fragment.data).trim().to_string();

    if !bbox.has_area() || content.is_empty() {
        return Ok(None);
    }

    Ok(Some(Word {
        bbox,
        content,
        font,
    }))
}
