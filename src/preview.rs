//! Interactive preview of a composed form.
//!
//! The preview is an SVG drawing of the page produced from the same layout pass as the PDF, using
//! font-independent metrics, so it can be shown before (or without) rendering the byte stream.
//! [`HostPage`] wraps it in a minimal HTML page with a download link.

use std::fmt::{self, Write as _};

use crate::graphic::VectorGraphic;
use crate::layout::{layout, ApproximateMetrics, Placement, Rect};
use crate::node::{BorderSides, Document, Rgb, TextAlign, TextLeaf};

/// Ascent used to turn a text box top into an SVG baseline.
const BASELINE_RATIO: f64 = 0.9;
const PREVIEW_FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const HOST_PAGE_CSS: &str = concat!(
    ".preview { height: 75vh; overflow: auto; border: 1px solid #ccc; } ",
    ".preview svg { height: 100%; width: auto; }",
);
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Progress of the download link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadStatus {
    /// The byte stream is still being produced.
    Preparing,
    /// The byte stream is available under the document's file name.
    Ready,
}

impl DownloadStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Preparing => "Preparing your PDF…",
            Self::Ready => "Download PDF",
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// SVG rendition of a document.
pub struct SvgPreview<'a> {
    document: &'a Document,
}

impl<'a> SvgPreview<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }
}

impl fmt::Display for SvgPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = layout(self.document, &ApproximateMetrics);
        let (width, height) = (page.width, page.height);
        write!(f, r#"<svg xmlns="{SVG_NAMESPACE}" width="{width}" height="{height}""#)?;
        writeln!(
            f,
            r#" viewBox="0 0 {width} {height}" font-family="{PREVIEW_FONT_FAMILY}">"#
        )?;
        writeln!(f, r#"<title>{}</title>"#, escape(self.document.title()))?;
        writeln!(
            f,
            r##"<rect width="{}" height="{}" fill="#ffffff"/>"##,
            page.width, page.height
        )?;

        for placement in &page.placements {
            match placement {
                Placement::Frame { rect, border } => write_frame(f, *rect, *border)?,
                Placement::Text { rect, leaf } => write_text(f, *rect, leaf)?,
                Placement::Graphic { rect, graphic } => write_graphic(f, *rect, graphic)?,
            }
        }
        f.write_str("</svg>")
    }
}

fn write_frame(f: &mut fmt::Formatter<'_>, rect: Rect, border: BorderSides) -> fmt::Result {
    let edges = [
        (border.top, rect.x, rect.y, rect.right(), rect.y),
        (border.right, rect.right(), rect.y, rect.right(), rect.bottom()),
        (border.bottom, rect.x, rect.bottom(), rect.right(), rect.bottom()),
        (border.left, rect.x, rect.y, rect.x, rect.bottom()),
    ];
    for (enabled, x1, y1, x2, y2) in edges {
        if enabled {
            writeln!(
                f,
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="1"/>"#,
                Rgb::BLACK.to_hex()
            )?;
        }
    }
    Ok(())
}

fn write_text(f: &mut fmt::Formatter<'_>, rect: Rect, leaf: &TextLeaf) -> fmt::Result {
    let style = &leaf.style;
    let baseline = rect.y + f64::from(style.font_size) * BASELINE_RATIO;
    let (x, anchor) = match style.align {
        TextAlign::Left => (rect.x, "start"),
        TextAlign::Center => (rect.x + rect.width / 2.0, "middle"),
    };
    let weight = if style.bold { "bold" } else { "normal" };
    write!(
        f,
        r#"<text x="{x}" y="{baseline}" font-size="{}" font-weight="{weight}""#,
        style.font_size
    )?;
    writeln!(
        f,
        r#" fill="{}" text-anchor="{anchor}">{}</text>"#,
        style.color.to_hex(),
        escape(&leaf.content)
    )
}

fn write_graphic(
    f: &mut fmt::Formatter<'_>,
    rect: Rect,
    graphic: &VectorGraphic,
) -> fmt::Result {
    let (sx, sy) = graphic.scale();
    writeln!(
        f,
        r#"<g transform="translate({} {}) scale({sx} {sy}) translate({} {})">"#,
        rect.x, rect.y, -graphic.view_box.x, -graphic.view_box.y
    )?;
    for path in &graphic.paths {
        let fill = path.fill.map_or_else(|| "none".to_owned(), Rgb::to_hex);
        write!(f, r#"<path d="{}" fill="{fill}""#, escape(&path.data))?;
        if let Some(stroke) = path.stroke {
            write!(
                f,
                r#" stroke="{}" stroke-width="{}""#,
                stroke.to_hex(),
                path.stroke_width
            )?;
        }
        f.write_str("/>\n")?;
    }
    f.write_str("</g>\n")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the document as a standalone SVG string.
pub fn render_svg(document: &Document) -> String {
    SvgPreview::new(document).to_string()
}

/// HTML page hosting the preview in a fixed-height frame with a download link.
pub struct HostPage<'a> {
    document: &'a Document,
    status: DownloadStatus,
}

impl<'a> HostPage<'a> {
    pub fn new(document: &'a Document, status: DownloadStatus) -> Self {
        Self { document, status }
    }
}

impl fmt::Display for HostPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = escape(self.document.title());
        let file_name = escape(self.document.file_name());

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"<meta charset="utf-8">"#)?;
        writeln!(f, "<title>{title}</title>")?;
        writeln!(f, "<style>{HOST_PAGE_CSS}</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, r#"<div class="preview">"#)?;
        writeln!(f, "{}", SvgPreview::new(self.document))?;
        writeln!(f, "</div>")?;

        let mut link = String::new();
        match self.status {
            DownloadStatus::Ready => write!(
                link,
                r#"<a class="download" href="{file_name}" download="{file_name}">{}</a>"#,
                self.status
            )?,
            DownloadStatus::Preparing => write!(
                link,
                r#"<span class="download" aria-busy="true">{}</span>"#,
                self.status
            )?,
        }
        writeln!(f, "<p>{link}</p>")?;
        writeln!(f, "</body>")?;
        f.write_str("</html>\n")
    }
}

/// Renders the host page for `document` in the given download state.
pub fn host_page(document: &Document, status: DownloadStatus) -> String {
    HostPage::new(document, status).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::DocumentComposer;
    use crate::fields::BoringLogFields;
    use crate::metrics::FormMetrics;

    fn sample_document() -> Document {
        DocumentComposer::new(FormMetrics::default(), BoringLogFields::sample()).compose()
    }

    #[test]
    fn status_labels() {
        assert_eq!(DownloadStatus::Preparing.label(), "Preparing your PDF…");
        assert_eq!(DownloadStatus::Ready.to_string(), "Download PDF");
    }

    #[test]
    fn svg_covers_the_page() {
        let svg = render_svg(&sample_document());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 792 612""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn svg_contains_values_and_icons() {
        let svg = render_svg(&sample_document());
        assert!(svg.contains(">BoreDM Drilling</text>"));
        assert!(svg.contains(">B-17</text>"));
        assert!(svg.contains(">Page 1 of 1</text>"));
        assert_eq!(svg.matches("<g transform=").count(), 2);
    }

    #[test]
    fn text_is_escaped() {
        let mut fields = BoringLogFields::sample();
        fields.drilling_firm = Some("Smith & <Sons>".to_owned());
        let document = DocumentComposer::new(FormMetrics::default(), fields).compose();
        let svg = render_svg(&document);
        assert!(svg.contains(">Smith &amp; &lt;Sons&gt;</text>"));
    }

    #[test]
    fn host_page_offers_download_once_ready() {
        let document = sample_document();
        let ready = host_page(&document, DownloadStatus::Ready);
        assert!(ready.contains("height: 75vh"));
        assert!(ready.contains(
            r#"href="BoreDM-B17.pdf" download="BoreDM-B17.pdf">Download PDF</a>"#
        ));

        let preparing = host_page(&document, DownloadStatus::Preparing);
        assert!(preparing.contains("Preparing your PDF…"));
        assert!(!preparing.contains("<a "));
    }
}
