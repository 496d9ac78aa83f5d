//! Content classifier: category, preview and thumbnail for one snapshot.
//!
//! Classification is an ordered first-match rule list. Earlier rules win because
//! real copies overlap: a Finder file copy also carries an icon image, a browser
//! selection carries both HTML and plain text.

pub mod code_heuristic;
pub mod decode;
pub mod preview;

use std::sync::Arc;

use crate::clipboard::content_type::{kind_of, ContentKind};
use crate::clipboard::{Category, Representation};
use crate::ports::ThumbnailGeneratorPort;

use self::code_heuristic::looks_like_source_code;
use self::decode::{decode_color, decode_text, file_names, html_to_text, parse_absolute_url, pdf_page_count};

/// URL schemes that turn a bare plain-text copy into a link.
const PLAIN_TEXT_LINK_SCHEMES: &[&str] = &["http", "https", "ftp", "ssh"];

/// Output of classifying one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub preview_text: String,
    pub thumbnail: Option<Vec<u8>>,
}

/// Read-only view over the representations of one snapshot, in capture order.
struct SnapshotView<'a> {
    representations: &'a [Representation],
}

impl<'a> SnapshotView<'a> {
    fn first(&self, kind: ContentKind) -> Option<&'a Representation> {
        self.representations
            .iter()
            .find(|rep| kind_of(&rep.type_id) == Some(kind))
    }

    fn has(&self, kind: ContentKind) -> bool {
        self.first(kind).is_some()
    }

    fn plain_text(&self) -> Option<String> {
        self.first(ContentKind::PlainText).map(decode_text)
    }

    fn text_of(&self, kind: ContentKind) -> Option<String> {
        self.first(kind).map(decode_text)
    }
}

pub struct ContentClassifier {
    thumbnails: Arc<dyn ThumbnailGeneratorPort>,
}

impl ContentClassifier {
    pub fn new(thumbnails: Arc<dyn ThumbnailGeneratorPort>) -> Self {
        Self { thumbnails }
    }

    /// Classify a snapshot. Pure with respect to its input: the same
    /// representations always yield the same classification.
    pub fn classify(&self, representations: &[Representation]) -> Classification {
        let view = SnapshotView { representations };
        let category = categorize(&view);

        let (preview_text, thumbnail) = match category {
            Category::FileReference => {
                let names = view
                    .first(ContentKind::FileReference)
                    .map(file_names)
                    .unwrap_or_default();
                (preview::file_list_preview(&names), None)
            }
            Category::Color => {
                let rgb = view.first(ContentKind::Color).and_then(decode_color);
                (preview::color_preview(rgb), None)
            }
            Category::Document => self.document_preview(&view),
            Category::Image => self.image_preview(&view),
            Category::Markup => {
                let text = view
                    .plain_text()
                    .filter(|text| !text.trim().is_empty())
                    .or_else(|| view.text_of(ContentKind::Html).map(|html| html_to_text(&html)))
                    .unwrap_or_default();
                (preview::text_preview(&text, category), None)
            }
            Category::RichText => {
                let text = view.plain_text().unwrap_or_default();
                (preview::text_preview(&text, category), None)
            }
            Category::TabularText => {
                let text = view
                    .plain_text()
                    .or_else(|| view.text_of(ContentKind::Tabular))
                    .unwrap_or_default();
                (preview::text_preview(&text, category), None)
            }
            Category::SourceCode => {
                let text = view
                    .plain_text()
                    .or_else(|| view.text_of(ContentKind::SourceCode))
                    .unwrap_or_default();
                (preview::text_preview(&text, category), None)
            }
            Category::Link | Category::PlainText => {
                let text = view.plain_text().unwrap_or_default();
                (preview::text_preview(&text, category), None)
            }
            Category::Other => (category.placeholder().to_string(), None),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            category = %category,
            representations = representations.len(),
            has_thumbnail = thumbnail.is_some(),
            "Classified clipboard snapshot"
        );

        Classification {
            category,
            preview_text,
            thumbnail,
        }
    }

    fn image_preview(&self, view: &SnapshotView<'_>) -> (String, Option<Vec<u8>>) {
        let generated = view
            .first(ContentKind::RasterImage)
            .and_then(|rep| self.thumbnails.generate_thumbnail(&rep.bytes).ok());
        match generated {
            Some(thumb) => (
                preview::image_preview(Some((thumb.original_width, thumb.original_height))),
                Some(thumb.thumbnail_bytes),
            ),
            None => (preview::image_preview(None), None),
        }
    }

    /// Document thumbnails come from an accompanying raster representation when the
    /// source app provided one, otherwise from the document bytes if the decoder
    /// understands them.
    fn document_preview(&self, view: &SnapshotView<'_>) -> (String, Option<Vec<u8>>) {
        let document = view.first(ContentKind::Pdf);
        let pages = document.and_then(|rep| pdf_page_count(&rep.bytes));
        let thumbnail = view
            .first(ContentKind::RasterImage)
            .or(document)
            .and_then(|rep| self.thumbnails.generate_thumbnail(&rep.bytes).ok())
            .map(|thumb| thumb.thumbnail_bytes);
        (preview::document_preview(pages), thumbnail)
    }
}

fn categorize(view: &SnapshotView<'_>) -> Category {
    if view.has(ContentKind::FileReference) {
        return Category::FileReference;
    }
    if view.has(ContentKind::Color) {
        return Category::Color;
    }
    if view.has(ContentKind::Pdf) {
        return Category::Document;
    }
    // Rich copies often ship a redundant icon next to the real text.
    if view.has(ContentKind::RasterImage) && !view.has(ContentKind::PlainText) {
        return Category::Image;
    }
    if view.has(ContentKind::Url)
        && view
            .plain_text()
            .and_then(|text| parse_absolute_url(&text))
            .is_some()
    {
        return Category::Link;
    }
    if view.has(ContentKind::Html) {
        return Category::Markup;
    }
    if view.has(ContentKind::RichText) {
        return Category::RichText;
    }
    if view.has(ContentKind::Tabular) {
        return Category::TabularText;
    }
    if view.has(ContentKind::SourceCode) {
        return Category::SourceCode;
    }
    if let Some(text) = view.plain_text() {
        let is_link = parse_absolute_url(&text)
            .is_some_and(|url| PLAIN_TEXT_LINK_SCHEMES.contains(&url.scheme()));
        return if is_link {
            Category::Link
        } else if looks_like_source_code(&text) {
            Category::SourceCode
        } else {
            Category::PlainText
        };
    }
    Category::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GeneratedThumbnail;

    /// Treats any payload starting with "IMG" as a decodable 640x480 image.
    struct FakeThumbnails;

    impl ThumbnailGeneratorPort for FakeThumbnails {
        fn generate_thumbnail(&self, image_bytes: &[u8]) -> anyhow::Result<GeneratedThumbnail> {
            if image_bytes.starts_with(b"IMG") {
                Ok(GeneratedThumbnail {
                    thumbnail_bytes: b"thumb".to_vec(),
                    original_width: 640,
                    original_height: 480,
                })
            } else {
                Err(anyhow::anyhow!("not an image"))
            }
        }
    }

    fn classify(reps: &[Representation]) -> Classification {
        ContentClassifier::new(Arc::new(FakeThumbnails)).classify(reps)
    }

    fn rep(type_id: &str, bytes: &[u8]) -> Representation {
        Representation::new(type_id, bytes.to_vec())
    }

    #[test]
    fn plain_text() {
        let result = classify(&[rep("public.utf8-plain-text", b"hello")]);
        assert_eq!(result.category, Category::PlainText);
        assert_eq!(result.preview_text, "hello");
        assert_eq!(result.thumbnail, None);
    }

    #[test]
    fn file_reference_beats_image() {
        let result = classify(&[
            rep("public.file-url", b"file:///Users/me/report.pdf"),
            rep("public.tiff", b"IMG icon"),
        ]);
        assert_eq!(result.category, Category::FileReference);
        assert_eq!(result.preview_text, "report.pdf");
    }

    #[test]
    fn image_with_text_is_not_image() {
        let result = classify(&[
            rep("public.png", b"IMG"),
            rep("public.utf8-plain-text", b"caption"),
        ]);
        assert_eq!(result.category, Category::PlainText);
    }

    #[test]
    fn image_alone_has_dimensions_and_thumbnail() {
        let result = classify(&[rep("image/png", b"IMG data")]);
        assert_eq!(result.category, Category::Image);
        assert_eq!(result.preview_text, "640 × 480 pixels");
        assert_eq!(result.thumbnail, Some(b"thumb".to_vec()));
    }

    #[test]
    fn undecodable_image_degrades_to_placeholder() {
        let result = classify(&[rep("image/png", b"garbage")]);
        assert_eq!(result.category, Category::Image);
        assert_eq!(result.preview_text, "Image");
        assert_eq!(result.thumbnail, None);
    }

    #[test]
    fn url_type_with_any_absolute_url_is_link() {
        let result = classify(&[
            rep("public.url", b"mailto:someone@example.com"),
            rep("public.utf8-plain-text", b"mailto:someone@example.com"),
        ]);
        assert_eq!(result.category, Category::Link);
    }

    #[test]
    fn url_type_with_non_url_text_falls_through() {
        let result = classify(&[
            rep("public.url", b"https://example.com"),
            rep("text/html", b"<a>click here</a>"),
            rep("public.utf8-plain-text", b"click here"),
        ]);
        assert_eq!(result.category, Category::Markup);
        assert_eq!(result.preview_text, "click here");
    }

    #[test]
    fn plain_text_link_needs_known_scheme() {
        let link = classify(&[rep("text/plain", b" https://example.com/path ")]);
        assert_eq!(link.category, Category::Link);
        assert_eq!(link.preview_text, "https://example.com/path");

        let other = classify(&[rep("text/plain", b"mailto:a@b.c")]);
        assert_eq!(other.category, Category::PlainText);
    }

    #[test]
    fn html_without_text_is_flattened() {
        let result = classify(&[rep("text/html", b"<p>Hi <b>there</b></p>")]);
        assert_eq!(result.category, Category::Markup);
        assert_eq!(result.preview_text, "Hi there");
    }

    #[test]
    fn rich_text_tabular_and_tagged_code() {
        let rtf = classify(&[rep("public.rtf", b"{\\rtf1 x}"), rep("public.utf8-plain-text", b"x")]);
        assert_eq!(rtf.category, Category::RichText);
        assert_eq!(rtf.preview_text, "x");

        let rtf_only = classify(&[rep("public.rtf", b"{\\rtf1 x}")]);
        assert_eq!(rtf_only.preview_text, "Rich Text");

        let csv = classify(&[rep("text/csv", b"a,b\n1,2")]);
        assert_eq!(csv.category, Category::TabularText);
        assert_eq!(csv.preview_text, "a,b\n1,2");

        let code = classify(&[rep("public.source-code", b"x = 1")]);
        assert_eq!(code.category, Category::SourceCode);
    }

    #[test]
    fn plain_text_that_looks_like_code() {
        let result = classify(&[rep("public.utf8-plain-text", b"func f() {\nreturn 1\n}")]);
        assert_eq!(result.category, Category::SourceCode);
    }

    #[test]
    fn color_and_document() {
        let mut color = Vec::new();
        for channel in [0x1200u16, 0x3400, 0x5600, 0xFFFF] {
            color.extend_from_slice(&channel.to_ne_bytes());
        }
        let result = classify(&[rep("application/x-color", &color)]);
        assert_eq!(result.category, Category::Color);
        assert_eq!(result.preview_text, "#123456");

        let pdf = classify(&[
            rep("com.adobe.pdf", b"%PDF-1.7 << /Type /Page >>"),
            rep("public.tiff", b"IMG page"),
        ]);
        assert_eq!(pdf.category, Category::Document);
        assert_eq!(pdf.preview_text, "PDF Document (1 page)");
        assert_eq!(pdf.thumbnail, Some(b"thumb".to_vec()));
    }

    #[test]
    fn unknown_types_are_other() {
        let result = classify(&[rep("com.example.private", b"\x00\x01")]);
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.preview_text, "Clipboard Content");
    }

    #[test]
    fn classification_is_idempotent() {
        let reps = [
            rep("text/html", b"<b>bold</b>"),
            rep("text/plain", b"bold"),
        ];
        assert_eq!(classify(&reps), classify(&reps));
    }
}
