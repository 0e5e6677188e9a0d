pub mod extract;
pub mod normalize;

use wordbox_core::extraction::pdftohtml::PdftohtmlExtractor;

fn extractor(no_repair: bool) -> PdftohtmlExtractor {
    let extractor = PdftohtmlExtractor::new();
    if no_repair {
        extractor.without_repair()
    } else {
        extractor
    }
}
