use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontStyle {
    pub color: String,
}

/// Canonical font. Two fonts with the same family, size and color are the
/// same font; the registry hands out one shared `Arc<Font>` for each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub style: FontStyle,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64, color: impl Into<String>) -> Self {
        Font {
            family: family.into(),
            size,
            style: FontStyle {
                color: color.into(),
            },
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt {}", self.family, self.size, self.style.color)
    }
}

/// Axis-aligned box in output units. Word boxes never have negative width
/// or height; page boxes are the raw page size times the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Word {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub content: String,
    pub font: Arc<Font>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// 1-based page number, copied from the extraction.
    pub number: u32,
    pub words: Vec<Word>,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub pages: Vec<Page>,
    pub source_id: String,
}

impl Document {
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|p| p.words.len()).sum()
    }

    /// Number of distinct `Font` instances referenced by words.
    pub fn font_count(&self) -> usize {
        let mut seen: Vec<&Arc<Font>> = Vec::new();
        for word in self.pages.iter().flat_map(|p| &p.words) {
            if !seen.iter().any(|f| Arc::ptr_eq(f, &word.font)) {
                seen.push(&word.font);
            }
        }
        seen.len()
    }
}
