use wordbox_core::model::Document;

pub fn print(document: &Document) {
    println!("=== {} ===\n", document.source_id);
    println!(
        "  {} page(s), {} word(s), {} font(s)\n",
        document.pages.len(),
        document.word_count(),
        document.font_count()
    );

    for page in &document.pages {
        println!(
            "--- Page {} ({:.1} x {:.1}) ---",
            page.number, page.bbox.width, page.bbox.height
        );

        if page.words.is_empty() {
            println!("  (no words)\n");
            continue;
        }

        let max_content = page
            .words
            .iter()
            .map(|w| w.content.chars().count())
            .max()
            .unwrap_or(10)
            .min(40);

        for word in &page.words {
            println!(
                "  {:>8.2} {:>8.2} {:>7.2} {:>6.2}  {:<width$}  {}",
                word.bbox.left,
                word.bbox.top,
                word.bbox.width,
                word.bbox.height,
                word.content,
                word.font,
                width = max_content
            );
        }
        println!();
    }
}
