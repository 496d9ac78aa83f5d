//! Mapping from platform type-identifiers to the content kinds the classifier reasons about.
//!
//! Identifiers come from three families: macOS UTIs (`public.utf8-plain-text`),
//! freedesktop MIME types (`text/plain;charset=utf-8`) and bare X11 targets (`UTF8_STRING`).

/// Content kind of a single representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    FileReference,
    Color,
    Pdf,
    RasterImage,
    Url,
    Html,
    RichText,
    Tabular,
    SourceCode,
    PlainText,
}

const FILE_REFERENCE_TYPES: &[&str] = &[
    "public.file-url",
    "text/uri-list",
    "x-special/gnome-copied-files",
    "nsfilenamespboardtype",
    "files",
    "application/x-kde-cutselection",
];

const COLOR_TYPES: &[&str] = &["application/x-color", "com.apple.cocoa.pasteboard.color"];

const PDF_TYPES: &[&str] = &["application/pdf", "com.adobe.pdf", "pdf"];

const IMAGE_TYPES: &[&str] = &[
    "public.png",
    "public.tiff",
    "public.jpeg",
    "public.image",
    "com.compuserve.gif",
    "org.webmproject.webp",
    "image",
];

const URL_TYPES: &[&str] = &["public.url", "text/x-moz-url", "_netscape_url", "url"];

const HTML_TYPES: &[&str] = &["text/html", "public.html", "html"];

const RICH_TEXT_TYPES: &[&str] = &[
    "text/rtf",
    "text/richtext",
    "application/rtf",
    "public.rtf",
    "com.apple.flat-rtfd",
    "rtf",
];

const TABULAR_TYPES: &[&str] = &[
    "text/csv",
    "text/tab-separated-values",
    "public.comma-separated-values-text",
    "public.utf8-tab-separated-values-text",
];

const SOURCE_CODE_TYPES: &[&str] = &[
    "public.source-code",
    "public.script",
    "text/x-csrc",
    "text/x-c++src",
    "text/x-chdr",
    "text/x-java",
    "text/x-python",
    "text/x-rust",
    "text/x-go",
    "text/x-shellscript",
    "application/javascript",
    "application/x-sh",
];

const PLAIN_TEXT_TYPES: &[&str] = &[
    "public.utf8-plain-text",
    "public.utf16-plain-text",
    "public.plain-text",
    "public.text",
    "nsstringpboardtype",
    "utf8_string",
    "string",
    "text",
    "compound_text",
];

/// Classify one type-identifier. Unknown identifiers yield `None`.
pub fn kind_of(type_id: &str) -> Option<ContentKind> {
    let lower = type_id.trim().to_ascii_lowercase();
    // MIME parameters (";charset=utf-8") never change the kind.
    let base = lower.split(';').next().unwrap_or_default().trim();

    let in_table = |table: &[&str]| table.contains(&base);

    if in_table(FILE_REFERENCE_TYPES) {
        Some(ContentKind::FileReference)
    } else if in_table(COLOR_TYPES) {
        Some(ContentKind::Color)
    } else if in_table(PDF_TYPES) {
        Some(ContentKind::Pdf)
    } else if in_table(IMAGE_TYPES) || base.starts_with("image/") {
        Some(ContentKind::RasterImage)
    } else if in_table(URL_TYPES) {
        Some(ContentKind::Url)
    } else if in_table(HTML_TYPES) {
        Some(ContentKind::Html)
    } else if in_table(RICH_TEXT_TYPES) {
        Some(ContentKind::RichText)
    } else if in_table(TABULAR_TYPES) {
        Some(ContentKind::Tabular)
    } else if in_table(SOURCE_CODE_TYPES) {
        Some(ContentKind::SourceCode)
    } else if in_table(PLAIN_TEXT_TYPES) || base == "text/plain" {
        Some(ContentKind::PlainText)
    } else {
        None
    }
}

pub fn is_kind(type_id: &str, kind: ContentKind) -> bool {
    kind_of(type_id) == Some(kind)
}
