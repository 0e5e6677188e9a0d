use crate::error::NormalizeError;
use crate::extraction::{RawFontDescriptor, RawPage};
use crate::model::Font;
use std::sync::Arc;

/// Canonical fonts created during one document conversion.
///
/// Fonts are matched on family, size and color, never on the extraction's
/// reference string, so differently-named declarations of the same
/// typography collapse to one shared instance.
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: Vec<Arc<Font>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, descriptor: &RawFontDescriptor) -> Arc<Font> {
        let candidate = Font::new(
            descriptor.family.as_str(),
            descriptor.size,
            descriptor.color.as_str(),
        );

        // Linear scan is fine, documents declare tens of fonts.
        if let Some(existing) = self.fonts.iter().find(|f| ***f == candidate) {
            return Arc::clone(existing);
        }

        tracing::debug!(font = %candidate, "registered font");
        let font = Arc::new(candidate);
        self.fonts.push(Arc::clone(&font));
        font
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Font declarations of a whole document, in page order.
///
/// pdftohtml declares each font once, on the first page that uses it, so
/// lookups have to see every page's declarations.
#[derive(Debug)]
pub struct FontTable<'a> {
    fonts: Vec<&'a RawFontDescriptor>,
}

impl<'a> FontTable<'a> {
    pub fn from_pages(pages: &'a [RawPage]) -> Self {
        FontTable {
            fonts: pages.iter().flat_map(|p| p.fonts.iter()).collect(),
        }
    }

    /// First declaration with the given reference.
    pub fn lookup(&self, font_ref: &str) -> Option<&'a RawFontDescriptor> {
        self.fonts.iter().copied().find(|f| f.font_ref == font_ref)
    }

    /// Like [`lookup`](Self::lookup), but an unknown reference is a structural fault.
    pub fn require(
        &self,
        page: u32,
        font_ref: &str,
    ) -> Result<&'a RawFontDescriptor, NormalizeError> {
        self.lookup(font_ref)
            .ok_or_else(|| NormalizeError::UndeclaredFont {
                page,
                font_ref: font_ref.to_string(),
            })
    }
}
