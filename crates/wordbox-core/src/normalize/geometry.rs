use crate::extraction::RawTextFragment;
use crate::model::BoundingBox;

/// Scale a raw box by `ratio`.
///
/// Width and height are clamped at zero; pdftohtml sometimes reports
/// inverted extents for degenerate glyphs. Left and top may stay negative.
pub fn scale(left: f64, top: f64, width: f64, height: f64, ratio: f64) -> BoundingBox {
    BoundingBox {
        left: left * ratio,
        top: top * ratio,
        width: (width * ratio).max(0.0),
        height: (height * ratio).max(0.0),
    }
}

pub fn scale_fragment(fragment: &RawTextFragment, ratio: f64) -> BoundingBox {
    scale(
        fragment.left,
        fragment.top,
        fragment.width,
        fragment.height,
        ratio,
    )
}

/// Page box: origin at zero, page dimensions scaled like word geometry.
///
/// Unlike word boxes the dimensions are not clamped.
pub fn page_box(width: f64, height: f64, ratio: f64) -> BoundingBox {
    BoundingBox {
        left: 0.0,
        top: 0.0,
        width: width * ratio,
        height: height * ratio,
    }
}
