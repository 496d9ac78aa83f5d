use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use thiserror::Error;

/// Closed set of content kinds a snapshot can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PlainText,
    RichText,
    Markup,
    Link,
    Image,
    Document,
    FileReference,
    Color,
    SourceCode,
    TabularText,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category tag: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 11] = [
        Category::PlainText,
        Category::RichText,
        Category::Markup,
        Category::Link,
        Category::Image,
        Category::Document,
        Category::FileReference,
        Category::Color,
        Category::SourceCode,
        Category::TabularText,
        Category::Other,
    ];

    /// Stable tag used in the index file and in configuration.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::PlainText => "plain_text",
            Category::RichText => "rich_text",
            Category::Markup => "markup",
            Category::Link => "link",
            Category::Image => "image",
            Category::Document => "document",
            Category::FileReference => "file_reference",
            Category::Color => "color",
            Category::SourceCode => "source_code",
            Category::TabularText => "tabular_text",
            Category::Other => "other",
        }
    }

    /// Preview shown when nothing could be extracted from the content.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Category::PlainText => "Text",
            Category::RichText => "Rich Text",
            Category::Markup => "HTML",
            Category::Link => "Link",
            Category::Image => "Image",
            Category::Document => "PDF Document",
            Category::FileReference => "File",
            Category::Color => "Color",
            Category::SourceCode => "Code",
            Category::TabularText => "Table",
            Category::Other => "Clipboard Content",
        }
    }

    /// Only raster-like categories carry a thumbnail.
    pub fn has_thumbnail(&self) -> bool {
        matches!(self, Category::Image | Category::Document)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let alias = match normalized.as_str() {
            "text" => "plain_text",
            "rtf" => "rich_text",
            "html" => "markup",
            "url" => "link",
            "pdf" => "document",
            "file" | "files" => "file_reference",
            "code" => "source_code",
            "csv" | "table" | "tabular" => "tabular_text",
            other => other,
        };
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.tag() == alias)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.tag().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn from_str_accepts_aliases_and_case() {
        assert_eq!("Source-Code".parse::<Category>().unwrap(), Category::SourceCode);
        assert_eq!("FILES".parse::<Category>().unwrap(), Category::FileReference);
        assert_eq!("html".parse::<Category>().unwrap(), Category::Markup);
        assert!("spreadsheet".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_tags() {
        let json = serde_json::to_string(&Category::TabularText).unwrap();
        assert_eq!(json, "\"tabular_text\"");
    }

    #[test]
    fn only_image_and_document_have_thumbnails() {
        let with_thumbnail: Vec<_> = Category::ALL
            .into_iter()
            .filter(Category::has_thumbnail)
            .collect();
        assert_eq!(with_thumbnail, vec![Category::Image, Category::Document]);
    }
}
