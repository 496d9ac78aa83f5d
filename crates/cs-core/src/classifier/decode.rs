//! Content-specific extraction from raw representation bytes.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;

use crate::clipboard::Representation;

/// Decode a text payload. UTF-16 types are decoded as UTF-16 (BOM-aware,
/// little-endian by default); everything else as lossy UTF-8.
pub fn decode_text(rep: &Representation) -> String {
    let type_id = rep.type_id.to_ascii_lowercase();
    let text = if type_id.contains("utf16") || type_id.contains("utf-16") {
        decode_utf16(&rep.bytes)
    } else {
        String::from_utf8_lossy(&rep.bytes).into_owned()
    };
    text.trim_end_matches('\0').to_string()
}

fn decode_utf16(bytes: &[u8]) -> String {
    let (body, big_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (bytes, false),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16_lossy(&units)
}

/// Parse `text` as an absolute URL. `Url::parse` only accepts input with a scheme.
pub fn parse_absolute_url(text: &str) -> Option<url::Url> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }
    url::Url::parse(trimmed)
        .ok()
        .filter(|url| !url.scheme().is_empty())
}

/// Base names of the files referenced by a file-reference payload.
///
/// Handles `text/uri-list` (with `#` comments), GNOME's `copy`/`cut` header line,
/// single `file://` URLs and bare paths.
pub fn file_names(rep: &Representation) -> Vec<String> {
    let text = decode_text(rep);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('<'))
        .filter(|line| !matches!(*line, "copy" | "cut"))
        .filter_map(file_name_of)
        .collect()
}

fn file_name_of(entry: &str) -> Option<String> {
    if let Ok(url) = url::Url::parse(entry) {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return base_name(&path);
            }
        }
        return url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
            .or_else(|| Some(entry.to_string()));
    }
    base_name(Path::new(entry))
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| Some(path.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
}

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("hex color pattern is valid"));

/// Decode a structured color payload into 8-bit RGB.
///
/// `application/x-color` carries four native-endian u16 channels (RGBA), as GTK
/// publishes it. A textual `#RRGGBB` payload is accepted as well and takes
/// precedence, since `"#RRGGBB\n"` is also eight bytes long.
pub fn decode_color(rep: &Representation) -> Option<(u8, u8, u8)> {
    if let Some(rgb) = decode_hex_color(&rep.bytes) {
        return Some(rgb);
    }
    if rep.bytes.len() != 8 {
        return None;
    }
    let channel = |i: usize| u16::from_ne_bytes([rep.bytes[i], rep.bytes[i + 1]]);
    Some((
        (channel(0) >> 8) as u8,
        (channel(2) >> 8) as u8,
        (channel(4) >> 8) as u8,
    ))
}

fn decode_hex_color(bytes: &[u8]) -> Option<(u8, u8, u8)> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    let captures = HEX_COLOR.captures(text)?;
    let hex = captures.get(1)?.as_str();
    let component = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((component(0..2)?, component(2..4)?, component(4..6)?))
}

static PDF_PAGE: Lazy<BytesRegex> = Lazy::new(|| {
    BytesRegex::new(r"/Type\s*/Page(?-u:\b)").expect("pdf page pattern is valid")
});

/// Number of page objects in a PDF payload, if it looks like a PDF at all.
pub fn pdf_page_count(bytes: &[u8]) -> Option<usize> {
    if !bytes.starts_with(b"%PDF") {
        return None;
    }
    let count = PDF_PAGE.find_iter(bytes).count();
    (count > 0).then_some(count)
}

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>|<[^>]+>")
        .expect("html tag pattern is valid")
});

/// Strip markup tags and collapse whitespace.
pub fn html_to_text(html: &str) -> String {
    let stripped = HTML_TAG.replace_all(html, " ");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "héllo".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let rep = Representation::new("public.utf16-plain-text", bytes);
        assert_eq!(decode_text(&rep), "héllo");
    }

    #[test]
    fn urls_need_a_scheme_and_no_spaces() {
        assert!(parse_absolute_url("https://example.com/a?b=c").is_some());
        assert!(parse_absolute_url("  ssh://host  ").is_some());
        assert!(parse_absolute_url("example.com").is_none());
        assert!(parse_absolute_url("see https://example.com").is_none());
    }

    #[test]
    fn uri_list_file_names() {
        let rep = Representation::new(
            "text/uri-list",
            "# comment\r\nfile:///home/me/My%20Notes.txt\r\nfile:///tmp/b.png\r\n",
        );
        assert_eq!(file_names(&rep), vec!["My Notes.txt", "b.png"]);
    }

    #[test]
    fn gnome_copied_files_header_is_skipped() {
        let rep = Representation::new(
            "x-special/gnome-copied-files",
            "cut\nfile:///srv/data/report.pdf",
        );
        assert_eq!(file_names(&rep), vec!["report.pdf"]);
    }

    #[test]
    fn x_color_decodes_to_rgb() {
        let mut bytes = Vec::new();
        for channel in [0xFFFFu16, 0x8000, 0x0000, 0xFFFF] {
            bytes.extend_from_slice(&channel.to_ne_bytes());
        }
        let rep = Representation::new("application/x-color", bytes);
        assert_eq!(decode_color(&rep), Some((0xFF, 0x80, 0x00)));
    }

    #[test]
    fn textual_hex_color() {
        let rep = Representation::new("application/x-color", "#1a2B3c");
        assert_eq!(decode_color(&rep), Some((0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn eight_byte_hex_text_is_not_read_as_channels() {
        let rep = Representation::new("application/x-color", "#a1b2c3\n");
        assert_eq!(rep.bytes.len(), 8);
        assert_eq!(decode_color(&rep), Some((0xa1, 0xb2, 0xc3)));
    }

    #[test]
    fn page_object_at_end_of_buffer_is_counted() {
        assert_eq!(pdf_page_count(b"%PDF-1.4\n<< /Type /Page"), Some(1));
        assert_eq!(pdf_page_count(b"%PDF-1.4\n<< /Type /Pages"), None);
    }

    #[test]
    fn counts_pdf_pages_but_not_page_tree() {
        let pdf = b"%PDF-1.4\n1 0 obj << /Type /Pages /Count 2 >>\n2 0 obj << /Type /Page >>\n3 0 obj << /Type/Page >>";
        assert_eq!(pdf_page_count(pdf), Some(2));
        assert_eq!(pdf_page_count(b"not a pdf"), None);
    }

    #[test]
    fn html_is_flattened() {
        let html = "<html><style>p{}</style><p>Hello&nbsp;<b>world</b></p>\n<p>again</p></html>";
        assert_eq!(html_to_text(html), "Hello world again");
    }
}
