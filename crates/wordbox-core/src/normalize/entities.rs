use quick_xml::escape::resolve_html5_entity;

/// Decode HTML/XML character references (`&amp;`, `&#233;`, `&#x2014;`,
/// `&nbsp;`, ...) in extraction text.
///
/// Unknown or malformed references are copied through unchanged.
pub fn decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let decoded = reference_name(tail).and_then(|name| {
            resolve(name).map(|value| (value, name.len() + 1))
        });

        match decoded {
            Some((value, consumed)) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Name between `&` and the terminating `;`, if the reference is terminated.
fn reference_name(tail: &str) -> Option<&str> {
    let end = tail.find(|c: char| c == ';' || c == '&' || c.is_whitespace())?;
    if end == 0 || !tail[end..].starts_with(';') {
        return None;
    }
    Some(&tail[..end])
}

fn resolve(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        // from_str_radix would also accept a leading sign
        let code = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).ok()?
            }
            Some(_) => return None,
            None if number.chars().all(|c| c.is_ascii_digit()) => number.parse::<u32>().ok()?,
            None => return None,
        };
        if code == 0 {
            return None;
        }
        return char::from_u32(code).map(String::from);
    }
    resolve_html5_entity(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode("A &amp; B"), "A & B");
        assert_eq!(decode("&lt;tag&gt; &quot;q&quot; &apos;s&apos;"), "<tag> \"q\" 's'");
        assert_eq!(decode("caf&eacute;"), "café");
        assert_eq!(decode("a&nbsp;b"), "a\u{a0}b");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode("&#233;t&#xE9;"), "été");
        assert_eq!(decode("&#X2014;"), "\u{2014}");
    }

    #[test]
    fn test_unknown_entity_passes_through() {
        assert_eq!(decode("&zzzz;"), "&zzzz;");
        assert_eq!(decode("x &#xZZ; y"), "x &#xZZ; y");
        assert_eq!(decode("&#0;"), "&#0;");
        assert_eq!(decode("&#1114112;"), "&#1114112;");
    }

    #[test]
    fn test_signed_numeric_reference_passes_through() {
        assert_eq!(decode("&#+65;"), "&#+65;");
        assert_eq!(decode("&#x+41;"), "&#x+41;");
        assert_eq!(decode("&#-65;"), "&#-65;");
        assert_eq!(decode("&#x;"), "&#x;");
        assert_eq!(decode("&#65;&#x41;"), "AA");
    }

    #[test]
    fn test_unterminated_ampersand_passes_through() {
        assert_eq!(decode("R&D"), "R&D");
        assert_eq!(decode("fish & chips"), "fish & chips");
        assert_eq!(decode("trailing &"), "trailing &");
        assert_eq!(decode("&;"), "&;");
        assert_eq!(decode("&amp &amp;"), "&amp &");
    }

    #[test]
    fn test_decode_is_single_pass() {
        assert_eq!(decode("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode("Hello, world"), "Hello, world");
        assert_eq!(decode(""), "");
    }
}
