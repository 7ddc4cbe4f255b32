//! `genpdf` element that draws a composed form.
//!
//! The element runs the layout pass with metrics taken from the document's font cache, then draws
//! every placement: box borders as hairline strokes, text through text sections and vector
//! graphics as scanline fills followed by their outlines.  `genpdf` only exposes line drawing, so
//! filled shapes are approximated by horizontal strokes spaced half a stroke width apart.

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::FontCache;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult};
use log::{debug, warn};

use crate::graphic::{scanline_spans, Point, Subpath, VectorGraphic};
use crate::layout::{layout, Placement, Rect, TextMeasure};
use crate::node::{BorderSides, Document, Rgb, TextAlign, TextLeaf, TextStyle};

const MM_PER_PT: f64 = 25.4 / 72.0;
/// Vertical distance between fill strokes; strokes are one point thick.
const FILL_STEP_PT: f64 = 0.5;
const HALF_STROKE_PT: f64 = 0.5;

pub(crate) fn mm_from_pt(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value * MM_PER_PT))
}

pub(crate) fn mm_to_pt(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0 / MM_PER_PT
}

fn pdf_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn pdf_style(style: &TextStyle) -> Style {
    let mut pdf = Style::new();
    pdf.set_font_size(style.font_size);
    pdf.set_color(pdf_color(style.color));
    if style.bold {
        pdf.set_bold();
    }
    pdf
}

/// [`TextMeasure`] backed by the fonts loaded into a `genpdf` document.
pub struct FontCacheMeasure<'f> {
    font_cache: &'f FontCache,
    base: Style,
}

impl<'f> FontCacheMeasure<'f> {
    /// Measures text in `base` overlaid with each leaf's own style.
    pub fn new(font_cache: &'f FontCache, base: Style) -> Self {
        Self { font_cache, base }
    }

    fn style_for(&self, style: &TextStyle) -> Style {
        self.base.and(pdf_style(style))
    }
}

impl TextMeasure for FontCacheMeasure<'_> {
    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        let string = StyledString::new(text.to_owned(), self.style_for(style));
        mm_to_pt(string.width(self.font_cache))
    }

    fn line_height(&self, style: &TextStyle) -> f64 {
        mm_to_pt(self.style_for(style).line_height(self.font_cache))
    }
}

/// Draws a whole [`Document`] into the page area handed out by the page decorator.
pub struct FormElement {
    document: Document,
}

impl FormElement {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Element for FormElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let measure = FontCacheMeasure::new(&context.font_cache, style);
        let page = layout(&self.document, &measure);

        let available_height = mm_to_pt(area.size().height);
        if !page.fits_page() || page.content_bottom() - page.padding > available_height {
            return Err(Error::new(
                format!(
                    "Boring log needs {:.1}pt of height but the page offers {:.1}pt",
                    page.content_bottom() - page.padding,
                    available_height
                ),
                ErrorKind::PageSizeExceeded,
            ));
        }

        let painter = Painter {
            font_cache: &context.font_cache,
            base: style,
            origin: page.padding,
        };
        for placement in &page.placements {
            match placement {
                Placement::Frame { rect, border } => painter.frame(&mut area, *rect, *border),
                Placement::Text { rect, leaf } => painter.text(&mut area, *rect, leaf)?,
                Placement::Graphic { rect, graphic } => {
                    painter.graphic(&mut area, *rect, graphic)?
                }
            }
        }
        debug!("drew {} placements", page.placements.len());

        let mut result = RenderResult::default();
        result.size = area.size();
        Ok(result)
    }
}

struct Painter<'f> {
    font_cache: &'f FontCache,
    base: Style,
    /// Page padding already applied to the area by the page decorator.
    origin: f64,
}

impl Painter<'_> {
    fn position(&self, x: f64, y: f64) -> Position {
        Position::new(mm_from_pt(x - self.origin), mm_from_pt(y - self.origin))
    }

    fn line(&self, area: &mut render::Area<'_>, from: Point, to: Point, color: Rgb) {
        let style = Style::new().with_color(pdf_color(color));
        area.draw_line(
            vec![self.position(from.x, from.y), self.position(to.x, to.y)],
            style,
        );
    }

    fn frame(&self, area: &mut render::Area<'_>, rect: Rect, border: BorderSides) {
        let top_left = Point::new(rect.x, rect.y);
        let top_right = Point::new(rect.right(), rect.y);
        let bottom_left = Point::new(rect.x, rect.bottom());
        let bottom_right = Point::new(rect.right(), rect.bottom());

        let edges = [
            (border.top, top_left, top_right),
            (border.right, top_right, bottom_right),
            (border.bottom, bottom_left, bottom_right),
            (border.left, top_left, bottom_left),
        ];
        for (enabled, from, to) in edges {
            if enabled {
                self.line(area, from, to, Rgb::BLACK);
            }
        }
    }

    fn text(&self, area: &mut render::Area<'_>, rect: Rect, leaf: &TextLeaf) -> Result<(), Error> {
        let style = self.base.and(pdf_style(&leaf.style));
        let width = mm_to_pt(StyledString::new(leaf.content.clone(), style).width(self.font_cache));
        let x = match leaf.style.align {
            TextAlign::Left => rect.x,
            TextAlign::Center => rect.x + (rect.width - width) / 2.0,
        };

        match area.text_section(self.font_cache, self.position(x, rect.y), style) {
            Some(mut section) => section.print_str(&leaf.content, style),
            None => {
                warn!("no room to print '{}' at {:.1}pt", leaf.content, rect.y);
                Ok(())
            }
        }
    }

    fn graphic(
        &self,
        area: &mut render::Area<'_>,
        rect: Rect,
        graphic: &VectorGraphic,
    ) -> Result<(), Error> {
        for path in &graphic.paths {
            let subpaths = path.subpaths().map_err(|err| {
                Error::new(
                    format!("Invalid path data '{}': {}", path.data, err),
                    ErrorKind::InvalidData,
                )
            })?;
            let placed: Vec<Subpath> = subpaths
                .into_iter()
                .map(|subpath| Subpath {
                    points: subpath
                        .points
                        .iter()
                        .map(|point| {
                            let local = graphic.to_local(*point);
                            Point::new(rect.x + local.x, rect.y + local.y)
                        })
                        .collect(),
                    closed: subpath.closed,
                })
                .collect();

            if let Some(fill) = path.fill {
                self.fill(area, &placed, fill);
            }
            if let Some(stroke) = path.stroke {
                for subpath in &placed {
                    self.outline(area, subpath, stroke);
                }
            }
        }
        Ok(())
    }

    fn fill(&self, area: &mut render::Area<'_>, subpaths: &[Subpath], color: Rgb) {
        let (top, bottom) = subpaths
            .iter()
            .flat_map(|subpath| subpath.points.iter())
            .fold((f64::MAX, f64::MIN), |(top, bottom), point| {
                (top.min(point.y), bottom.max(point.y))
            });
        if top >= bottom {
            return;
        }

        let mut y = top + HALF_STROKE_PT;
        while y <= bottom - HALF_STROKE_PT {
            for (from, to) in scanline_spans(subpaths, y) {
                self.line(area, Point::new(from, y), Point::new(to, y), color);
            }
            y += FILL_STEP_PT;
        }
    }

    fn outline(&self, area: &mut render::Area<'_>, subpath: &Subpath, color: Rgb) {
        let mut points: Vec<Position> = subpath
            .points
            .iter()
            .map(|point| self.position(point.x, point.y))
            .collect();
        if subpath.closed {
            if let Some(first) = points.first().cloned() {
                points.push(first);
            }
        }
        if points.len() >= 2 {
            area.draw_line(points, Style::new().with_color(pdf_color(color)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_conversion_round_trips_through_millimetres() {
        let mm = mm_from_pt(72.0);
        let printed: printpdf::Mm = mm.into();
        assert!((printed.0 - 25.4).abs() < 1e-9);
        assert!((mm_to_pt(mm) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn text_style_maps_to_pdf_style() {
        let style = pdf_style(&TextStyle::new(22).bold().colored(Rgb(0x22, 0x22, 0x22)));
        assert!(style.is_bold());
        assert_eq!(style.font_size(), 22);
        assert_eq!(style.color(), Some(Color::Rgb(0x22, 0x22, 0x22)));
    }
}
