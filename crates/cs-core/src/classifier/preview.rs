//! Category-specific preview strings.

use crate::clipboard::{Category, MAX_PREVIEW_UTF16_UNITS};

const MAX_LISTED_FILES: usize = 5;

/// Trim and bound a text preview; falls back to the category placeholder when empty.
pub fn text_preview(text: &str, category: Category) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return category.placeholder().to_string();
    }
    truncate_utf16(trimmed, MAX_PREVIEW_UTF16_UNITS)
}

/// Cut `text` to at most `max_units` UTF-16 code units, never splitting a character.
pub fn truncate_utf16(text: &str, max_units: usize) -> String {
    let mut units = 0;
    for (byte_index, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            return text[..byte_index].to_string();
        }
    }
    text.to_string()
}

/// "a.txt, b.txt +3 more"
pub fn file_list_preview(names: &[String]) -> String {
    if names.is_empty() {
        return Category::FileReference.placeholder().to_string();
    }
    let listed = names
        .iter()
        .take(MAX_LISTED_FILES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let preview = match names.len().saturating_sub(MAX_LISTED_FILES) {
        0 => listed,
        more => format!("{listed} +{more} more"),
    };
    truncate_utf16(&preview, MAX_PREVIEW_UTF16_UNITS)
}

pub fn color_preview(rgb: Option<(u8, u8, u8)>) -> String {
    match rgb {
        Some((r, g, b)) => format!("#{r:02X}{g:02X}{b:02X}"),
        None => Category::Color.placeholder().to_string(),
    }
}

pub fn image_preview(dimensions: Option<(u32, u32)>) -> String {
    match dimensions {
        Some((width, height)) => format!("{width} × {height} pixels"),
        None => Category::Image.placeholder().to_string(),
    }
}

pub fn document_preview(page_count: Option<usize>) -> String {
    match page_count {
        Some(1) => format!("{} (1 page)", Category::Document.placeholder()),
        Some(pages) => format!("{} ({pages} pages)", Category::Document.placeholder()),
        None => Category::Document.placeholder().to_string(),
    }
}
