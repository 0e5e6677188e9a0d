use crate::error::NormalizeError;
use crate::extraction::repair::{NoRepair, QpdfRepairer, Repairer};
use crate::extraction::{PdfExtractor, RawDocument, RawFontDescriptor, RawPage, RawTextFragment};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use std::process::Command;

/// PDF extraction backend using pdftohtml (from poppler-utils).
///
/// Runs `pdftohtml -xml` and reads the `pdf2xml` document it prints: one
/// `<page>` per page with `<fontspec>` declarations and absolutely
/// positioned `<text>` runs. Coordinates are in pdftohtml's pixel space
/// (1.5x PDF points at the default zoom).
pub struct PdftohtmlExtractor {
    binary: PathBuf,
    repairer: Box<dyn Repairer>,
}

impl PdftohtmlExtractor {
    pub fn new() -> Self {
        PdftohtmlExtractor {
            binary: PathBuf::from("pdftohtml"),
            repairer: Box::new(QpdfRepairer::new()),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_repair(mut self, repairer: Box<dyn Repairer>) -> Self {
        self.repairer = repairer;
        self
    }

    pub fn without_repair(self) -> Self {
        self.with_repair(Box::new(NoRepair))
    }

    /// Check if pdftohtml is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn run(&self, pdf_path: &Path) -> Result<String, NormalizeError> {
        let output = Command::new(&self.binary)
            .args(["-xml", "-i", "-q", "-enc", "UTF-8", "-stdout"])
            .arg(pdf_path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NormalizeError::PdftohtmlNotFound
                } else {
                    NormalizeError::Extraction(format!("pdftohtml failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(NormalizeError::PdftohtmlFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for PdftohtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftohtmlExtractor {
    fn extract(&self, pdf_bytes: &[u8]) -> Result<RawDocument, NormalizeError> {
        // Scratch dir holds the input and anything the repair step writes.
        let scratch = tempfile::tempdir().map_err(|e| NormalizeError::Extraction(e.to_string()))?;
        let input_path = scratch.path().join("input.pdf");
        std::fs::write(&input_path, pdf_bytes)
            .map_err(|e| NormalizeError::Extraction(e.to_string()))?;

        let source = match self.repairer.repair(&input_path, scratch.path())? {
            Some(repaired) => {
                tracing::debug!(repairer = self.repairer.name(), "using repaired input");
                repaired
            }
            None => input_path,
        };

        let xml = self.run(&source)?;
        parse_pdf2xml(&xml)
    }

    fn backend_name(&self) -> &str {
        "pdftohtml"
    }
}

/// Parse `pdftohtml -xml` output into a [`RawDocument`].
///
/// Text content is kept entity-escaped; inline `<b>`, `<i>` and `<a>`
/// markup inside a `<text>` element is dropped and its content kept.
pub fn parse_pdf2xml(xml: &str) -> Result<RawDocument, NormalizeError> {
    let mut reader = Reader::from_str(xml);
    let mut doc = RawDocument::default();
    let mut current_page: Option<RawPage> = None;
    let mut current_text: Option<RawTextFragment> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => current_page = Some(parse_page(&e)?),
                b"text" => current_text = Some(parse_fragment(&e)?),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"fontspec" => {
                    let font = parse_fontspec(&e)?;
                    page_mut(&mut current_page, "fontspec")?.fonts.push(font);
                }
                b"text" => {
                    let fragment = parse_fragment(&e)?;
                    page_mut(&mut current_page, "text")?.fragments.push(fragment);
                }
                b"page" => doc.pages.push(parse_page(&e)?),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(fragment) = current_text.as_mut() {
                    let raw = std::str::from_utf8(&t)
                        .map_err(|e| NormalizeError::ParseError(e.to_string()))?;
                    fragment.data.push_str(raw);
                }
            }
            Ok(Event::CData(c)) => {
                // Fragment text is kept escaped, so escape CDATA to match.
                if let Some(fragment) = current_text.as_mut() {
                    let raw = std::str::from_utf8(&c)
                        .map_err(|e| NormalizeError::ParseError(e.to_string()))?;
                    fragment.data.push_str(&escape(raw));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"text" => {
                    if let Some(fragment) = current_text.take() {
                        page_mut(&mut current_page, "text")?.fragments.push(fragment);
                    }
                }
                b"page" => {
                    if let Some(page) = current_page.take() {
                        doc.pages.push(page);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(NormalizeError::ParseError(format!(
                    "invalid pdf2xml at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(doc)
}

fn page_mut<'a>(
    page: &'a mut Option<RawPage>,
    tag: &str,
) -> Result<&'a mut RawPage, NormalizeError> {
    page.as_mut()
        .ok_or_else(|| NormalizeError::ParseError(format!("<{}> outside of <page>", tag)))
}

fn parse_page(e: &BytesStart) -> Result<RawPage, NormalizeError> {
    Ok(RawPage {
        number: parse_attr(e, "number")?,
        width: parse_number(e, "width")?,
        height: parse_number(e, "height")?,
        fonts: Vec::new(),
        fragments: Vec::new(),
    })
}

fn parse_fontspec(e: &BytesStart) -> Result<RawFontDescriptor, NormalizeError> {
    Ok(RawFontDescriptor {
        font_ref: attr(e, "id")?,
        family: attr(e, "family")?,
        size: parse_number(e, "size")?,
        color: attr(e, "color")?,
    })
}

fn parse_fragment(e: &BytesStart) -> Result<RawTextFragment, NormalizeError> {
    Ok(RawTextFragment {
        font_ref: attr(e, "font")?,
        left: parse_number(e, "left")?,
        top: parse_number(e, "top")?,
        width: parse_number(e, "width")?,
        height: parse_number(e, "height")?,
        data: String::new(),
    })
}

fn attr(e: &BytesStart, name: &str) -> Result<String, NormalizeError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let attribute = e
        .try_get_attribute(name)
        .map_err(|err| NormalizeError::ParseError(format!("<{}>: {}", tag, err)))?
        .ok_or_else(|| {
            NormalizeError::ParseError(format!("<{}> is missing attribute '{}'", tag, name))
        })?;
    let value = attribute
        .unescape_value()
        .map_err(|err| NormalizeError::ParseError(format!("<{} {}>: {}", tag, name, err)))?;
    Ok(value.into_owned())
}

fn parse_attr<T: std::str::FromStr>(e: &BytesStart, name: &str) -> Result<T, NormalizeError> {
    let value = attr(e, name)?;
    value.trim().parse().map_err(|_| {
        NormalizeError::ParseError(format!("attribute '{}' is not a number: '{}'", name, value))
    })
}

/// Like [`parse_attr`], but only finite values are accepted.
fn parse_number(e: &BytesStart, name: &str) -> Result<f64, NormalizeError> {
    let value: f64 = parse_attr(e, name)?;
    if !value.is_finite() {
        return Err(NormalizeError::ParseError(format!(
            "attribute '{}' is not a finite number: {}",
            name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE pdf2xml SYSTEM "pdf2xml.dtd">
<pdf2xml producer="poppler" version="23.02.0">
<page number="1" position="absolute" top="0" left="0" height="1188" width="918">
	<fontspec id="0" size="12" family="Arial" color="#000000"/>
	<fontspec id="1" size="18" family="Arial" color="#000000"/>
<text top="20" left="10" width="30" height="6" font="0">Hello</text>
<text top="40" left="10" width="60" height="6" font="1"><b>Fish &amp; <i>Chips</i></b></text>
</page>
<page number="2" position="absolute" top="0" left="0" height="1188" width="918">
	<fontspec id="2" size="12" family="Times" color="#ff0000"/>
<text top="20" left="10" width="30" height="6" font="0"> </text>
<text top="50" left="10" width="30" height="6" font="2"><a href="https://example.com">link</a></text>
</page>
<outline>
<item page="1">Heading</item>
</outline>
</pdf2xml>
"##;

    #[test]
    fn test_parse_pdf2xml_pages_and_fonts() {
        let doc = parse_pdf2xml(SAMPLE).unwrap();
        assert_eq!(doc.pages.len(), 2);

        let first = &doc.pages[0];
        assert_eq!(first.number, 1);
        assert_eq!(first.width, 918.0);
        assert_eq!(first.height, 1188.0);
        assert_eq!(first.fonts.len(), 2);
        assert_eq!(first.fonts[1].font_ref, "1");
        assert_eq!(first.fonts[1].size, 18.0);
        assert_eq!(first.fonts[0].color, "#000000");

        assert_eq!(doc.pages[1].fonts.len(), 1);
        assert_eq!(doc.pages[1].fonts[0].family, "Times");
    }

    #[test]
    fn test_parse_pdf2xml_fragments_keep_escaped_text() {
        let doc = parse_pdf2xml(SAMPLE).unwrap();
        let fragments = &doc.pages[0].fragments;
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].data, "Hello");
        assert_eq!(fragments[0].left, 10.0);
        assert_eq!(fragments[0].top, 20.0);
        assert_eq!(fragments[0].width, 30.0);
        assert_eq!(fragments[0].height, 6.0);
        assert_eq!(fragments[1].font_ref, "1");
        assert_eq!(fragments[1].data, "Fish &amp; Chips");

        let second = &doc.pages[1].fragments;
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].data, " ");
        assert_eq!(second[1].data, "link");
    }

    #[test]
    fn test_parse_pdf2xml_missing_attribute() {
        let xml = r#"<pdf2xml><page number="1" width="10"></page></pdf2xml>"#;
        let err = parse_pdf2xml(xml).unwrap_err();
        assert!(matches!(err, NormalizeError::ParseError(ref m) if m.contains("height")));
    }

    #[test]
    fn test_parse_pdf2xml_non_numeric_attribute() {
        let xml = r#"<pdf2xml><page number="one" width="10" height="10"></page></pdf2xml>"#;
        assert!(matches!(
            parse_pdf2xml(xml),
            Err(NormalizeError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_pdf2xml_rejects_non_finite_numbers() {
        let xml = r##"<pdf2xml><page number="1" width="10" height="10">
<fontspec id="0" size="NaN" family="A" color="#000"/>
</page></pdf2xml>"##;
        assert!(matches!(
            parse_pdf2xml(xml),
            Err(NormalizeError::ParseError(ref m)) if m.contains("size")
        ));

        let xml = r#"<pdf2xml><page number="1" width="inf" height="10"></page></pdf2xml>"#;
        assert!(matches!(
            parse_pdf2xml(xml),
            Err(NormalizeError::ParseError(ref m)) if m.contains("width")
        ));
    }

    #[test]
    fn test_parse_pdf2xml_cdata_kept_escaped() {
        let xml = r##"<pdf2xml><page number="1" width="10" height="10">
<fontspec id="0" size="12" family="A" color="#000"/>
<text top="1" left="1" width="5" height="5" font="0">a <![CDATA[R&D <x>]]></text>
</page></pdf2xml>"##;
        let doc = parse_pdf2xml(xml).unwrap();
        assert_eq!(doc.pages[0].fragments[0].data, "a R&amp;D &lt;x&gt;");
    }

    #[test]
    fn test_parse_pdf2xml_fontspec_outside_page() {
        let xml = r##"<pdf2xml><fontspec id="0" size="1" family="A" color="#000"/></pdf2xml>"##;
        assert!(matches!(
            parse_pdf2xml(xml),
            Err(NormalizeError::ParseError(ref m)) if m.contains("fontspec")
        ));
    }

    #[test]
    fn test_missing_binary_reports_not_found() {
        let extractor = PdftohtmlExtractor::new()
            .with_binary("/nonexistent/pdftohtml-for-tests")
            .without_repair();
        assert!(!extractor.is_available());
        let err = extractor.extract(b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, NormalizeError::PdftohtmlNotFound));
    }
}
