//! Resolves the layout tree into absolutely positioned boxes.
//!
//! The pass implements the small subset of flexbox the form relies on: rows place children left
//! to right, columns stack them, fixed widths are honoured, `Fill` boxes share whatever space is
//! left and `Center` alignment splits the slack evenly.  Text never wraps.  All coordinates are in
//! points measured from the top-left corner of the page.

use crate::graphic::VectorGraphic;
use crate::node::{
    Alignment, BorderSides, Document, Edges, LayoutNode, Length, TextLeaf, TextStyle,
};

const APPROXIMATE_ADVANCE: f64 = 0.5;
const APPROXIMATE_BOLD_ADVANCE: f64 = 0.55;
const APPROXIMATE_LINE_SPACING: f64 = 1.2;

/// Text metrics needed to size leaves.
pub trait TextMeasure {
    /// Width of `text` set in `style`, in points.
    fn text_width(&self, text: &str, style: &TextStyle) -> f64;
    /// Height of one line set in `style`, in points.
    fn line_height(&self, style: &TextStyle) -> f64;
}

/// Font-independent metrics based on an average glyph advance.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproximateMetrics;

impl TextMeasure for ApproximateMetrics {
    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        let advance = if style.bold {
            APPROXIMATE_BOLD_ADVANCE
        } else {
            APPROXIMATE_ADVANCE
        };
        text.chars().count() as f64 * f64::from(style.font_size) * advance
    }

    fn line_height(&self, style: &TextStyle) -> f64 {
        f64::from(style.font_size) * APPROXIMATE_LINE_SPACING
    }
}

/// Axis-aligned rectangle in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Something to draw at a resolved position.
#[derive(Clone, Debug, PartialEq)]
pub enum Placement<'a> {
    /// Border edges of a box.
    Frame { rect: Rect, border: BorderSides },
    Text { rect: Rect, leaf: &'a TextLeaf },
    Graphic {
        rect: Rect,
        graphic: &'a VectorGraphic,
    },
}

/// Fully resolved page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout<'a> {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub placements: Vec<Placement<'a>>,
    regions: Vec<(&'a str, Rect)>,
}

impl<'a> PageLayout<'a> {
    /// Rectangle of the named row or column.
    pub fn region(&self, name: &str) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(region, _)| *region == name)
            .map(|(_, rect)| *rect)
    }

    /// Named regions in document order.
    pub fn regions(&self) -> impl Iterator<Item = (&'a str, Rect)> + '_ {
        self.regions.iter().copied()
    }

    /// Lowest edge reached by any placement.
    pub fn content_bottom(&self) -> f64 {
        self.placements
            .iter()
            .map(|placement| match placement {
                Placement::Frame { rect, .. }
                | Placement::Text { rect, .. }
                | Placement::Graphic { rect, .. } => rect.bottom(),
            })
            .fold(self.padding, f64::max)
    }

    /// Returns whether everything stays inside the padded page area.
    pub fn fits_page(&self) -> bool {
        self.content_bottom() <= self.height - self.padding + f64::EPSILON
    }
}

/// Lays out the document using the given text metrics.
pub fn layout<'a>(document: &'a Document, measure: &dyn TextMeasure) -> PageLayout<'a> {
    let page = document.page();
    let mut engine = Engine {
        measure,
        placements: Vec::new(),
        regions: Vec::new(),
    };

    let content_width = page.width - 2.0 * page.padding;
    let mut y = page.padding;
    for child in &page.children {
        let margin = margin_of(child);
        let width = engine.column_child_width(child, content_width);
        let height = engine.height_of(child, width);
        y += margin.top;
        engine.place(child, page.padding + margin.left, y, width, height);
        y += height + margin.bottom;
    }

    PageLayout {
        width: page.width,
        height: page.height,
        padding: page.padding,
        placements: engine.placements,
        regions: engine.regions,
    }
}

fn margin_of(node: &LayoutNode) -> Edges {
    match node {
        LayoutNode::Row(container) | LayoutNode::Column(container) => container.style.margin,
        LayoutNode::Text(leaf) => leaf.margin,
        LayoutNode::Graphic(graphic) => graphic.margin,
        LayoutNode::Page(_) => Edges::ZERO,
    }
}

struct Engine<'a, 'm> {
    measure: &'m dyn TextMeasure,
    placements: Vec<Placement<'a>>,
    regions: Vec<(&'a str, Rect)>,
}

impl<'a, 'm> Engine<'a, 'm> {
    /// Width a node wants on its own, or `None` when it fills its parent.
    fn intrinsic_width(&self, node: &LayoutNode) -> Option<f64> {
        match node {
            LayoutNode::Text(leaf) => Some(self.measure.text_width(&leaf.content, &leaf.style)),
            LayoutNode::Graphic(graphic) => Some(graphic.width),
            LayoutNode::Row(container) | LayoutNode::Column(container) => {
                match container.style.width {
                    Length::Fixed(width) => Some(width),
                    Length::Fill => None,
                }
            }
            LayoutNode::Page(page) => Some(page.width),
        }
    }

    /// Width of a child stacked in a column; text and fill boxes stretch.
    fn column_child_width(&self, node: &LayoutNode, content_width: f64) -> f64 {
        match node {
            LayoutNode::Text(_) => (content_width - margin_of(node).horizontal_sum()).max(0.0),
            _ => self
                .intrinsic_width(node)
                .unwrap_or_else(|| (content_width - margin_of(node).horizontal_sum()).max(0.0)),
        }
    }

    /// Widths of children placed side by side; fill boxes share the remainder evenly.
    fn row_child_widths(&self, children: &[LayoutNode], content_width: f64) -> Vec<f64> {
        let intrinsic: Vec<Option<f64>> =
            children.iter().map(|child| self.intrinsic_width(child)).collect();
        let used: f64 = children
            .iter()
            .zip(&intrinsic)
            .map(|(child, width)| width.unwrap_or(0.0) + margin_of(child).horizontal_sum())
            .sum();
        let fill_count = intrinsic.iter().filter(|width| width.is_none()).count();
        let share = if fill_count > 0 {
            ((content_width - used) / fill_count as f64).max(0.0)
        } else {
            0.0
        };

        intrinsic
            .into_iter()
            .map(|width| width.unwrap_or(share))
            .collect()
    }

    /// Border-box height of a node laid out at the given width.
    fn height_of(&self, node: &LayoutNode, width: f64) -> f64 {
        match node {
            LayoutNode::Text(leaf) => self.measure.line_height(&leaf.style),
            LayoutNode::Graphic(graphic) => graphic.height,
            LayoutNode::Page(page) => page.height,
            LayoutNode::Row(container) => container.style.height.unwrap_or_else(|| {
                let padding = container.style.padding;
                let content_width = width - padding.horizontal_sum();
                let widths = self.row_child_widths(&container.children, content_width);
                let tallest = container
                    .children
                    .iter()
                    .zip(widths)
                    .map(|(child, child_width)| {
                        self.height_of(child, child_width) + margin_of(child).vertical_sum()
                    })
                    .fold(0.0, f64::max);
                tallest + padding.vertical_sum()
            }),
            LayoutNode::Column(container) => container.style.height.unwrap_or_else(|| {
                let padding = container.style.padding;
                let content_width = width - padding.horizontal_sum();
                let stacked: f64 = container
                    .children
                    .iter()
                    .map(|child| {
                        let child_width = self.column_child_width(child, content_width);
                        self.height_of(child, child_width) + margin_of(child).vertical_sum()
                    })
                    .sum();
                stacked + padding.vertical_sum()
            }),
        }
    }

    fn place(&mut self, node: &'a LayoutNode, x: f64, y: f64, width: f64, height: f64) {
        let rect = Rect::new(x, y, width, height);
        match node {
            LayoutNode::Text(leaf) => self.placements.push(Placement::Text { rect, leaf }),
            LayoutNode::Graphic(graphic) => {
                self.placements.push(Placement::Graphic { rect, graphic })
            }
            LayoutNode::Page(_) => {}
            LayoutNode::Row(container) | LayoutNode::Column(container) => {
                let style = &container.style;
                if style.border.any() {
                    self.placements.push(Placement::Frame {
                        rect,
                        border: style.border,
                    });
                }
                if let Some(name) = container.name.as_deref() {
                    self.regions.push((name, rect));
                }

                let content = Rect::new(
                    x + style.padding.left,
                    y + style.padding.top,
                    width - style.padding.horizontal_sum(),
                    height - style.padding.vertical_sum(),
                );
                if matches!(node, LayoutNode::Row(_)) {
                    self.place_row(&container.children, content, style.justify, style.align);
                } else {
                    self.place_column(&container.children, content, style.justify, style.align);
                }
            }
        }
    }

    fn place_row(
        &mut self,
        children: &'a [LayoutNode],
        content: Rect,
        justify: Alignment,
        align: Alignment,
    ) {
        let widths = self.row_child_widths(children, content.width);
        let heights: Vec<f64> = children
            .iter()
            .zip(&widths)
            .map(|(child, width)| self.height_of(child, *width))
            .collect();
        let total: f64 = children
            .iter()
            .zip(&widths)
            .map(|(child, width)| width + margin_of(child).horizontal_sum())
            .sum();

        let mut x = match justify {
            Alignment::Start => content.x,
            Alignment::Center => content.x + (content.width - total) / 2.0,
        };
        for ((child, width), height) in children.iter().zip(widths).zip(heights) {
            let margin = margin_of(child);
            let y = match align {
                Alignment::Start => content.y + margin.top,
                Alignment::Center => {
                    content.y + (content.height - height - margin.vertical_sum()) / 2.0 + margin.top
                }
            };
            x += margin.left;
            self.place(child, x, y, width, height);
            x += width + margin.right;
        }
    }

    fn place_column(
        &mut self,
        children: &'a [LayoutNode],
        content: Rect,
        justify: Alignment,
        align: Alignment,
    ) {
        let sizes: Vec<(f64, f64)> = children
            .iter()
            .map(|child| {
                let width = self.column_child_width(child, content.width);
                (width, self.height_of(child, width))
            })
            .collect();
        let total: f64 = children
            .iter()
            .zip(&sizes)
            .map(|(child, (_, height))| height + margin_of(child).vertical_sum())
            .sum();

        let mut y = match justify {
            Alignment::Start => content.y,
            Alignment::Center => content.y + (content.height - total) / 2.0,
        };
        for (child, (width, height)) in children.iter().zip(sizes) {
            let margin = margin_of(child);
            let x = match align {
                Alignment::Start => content.x + margin.left,
                Alignment::Center => {
                    let slack = content.width - width - margin.horizontal_sum();
                    content.x + slack / 2.0 + margin.left
                }
            };
            y += margin.top;
            self.place(child, x, y, width, height);
            y += height + margin.bottom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::DocumentComposer;
    use crate::fields::BoringLogFields;
    use crate::metrics::FormMetrics;

    fn sample_layout(document: &Document) -> PageLayout<'_> {
        layout(document, &ApproximateMetrics)
    }

    fn compose() -> Document {
        DocumentComposer::new(FormMetrics::default(), BoringLogFields::sample()).compose()
    }

    #[test]
    fn header_columns_tile_the_usable_width() {
        let document = compose();
        let page = sample_layout(&document);
        let left = page.region("header-left").expect("logo column");
        let mid = page.region("header-mid").expect("title column");
        let right = page.region("header-right").expect("page column");
        assert_eq!(left.x, 20.0);
        assert_eq!(left.right(), mid.x);
        assert_eq!(mid.width, 412.0);
        assert_eq!(mid.right(), right.x);
        assert_eq!(right.right(), 772.0);
    }

    #[test]
    fn remarks_panel_ends_level_with_the_grid() {
        let document = compose();
        let page = sample_layout(&document);
        let grid = page.region("left-grid").expect("grid");
        let remarks = page.region("remarks").expect("remarks");
        let fill = page.region("remarks-fill").expect("remarks fill");
        assert_eq!(grid.height, 128.0);
        assert_eq!(remarks.height, grid.height);
        assert_eq!(fill.bottom(), grid.bottom());
        assert_eq!(remarks.x, grid.right());
        assert_eq!(remarks.right(), 772.0);
    }

    #[test]
    fn footer_strip_follows_the_grid() {
        let document = compose();
        let page = sample_layout(&document);
        let grid = page.region("left-grid").expect("grid");
        let footer = page.region("footer").expect("footer");
        assert_eq!(footer.y, grid.bottom());
        assert_eq!(footer.height, 32.0);
        assert!(page.fits_page());
    }

    #[test]
    fn values_align_across_a_column() {
        let document = compose();
        let page = sample_layout(&document);
        let value_x = |value: &str| {
            page.placements
                .iter()
                .find_map(|placement| match placement {
                    Placement::Text { rect, leaf } if leaf.content == value => Some(rect.x),
                    _ => None,
                })
                .expect("value placed")
        };
        // Label box (120) plus gap (6) from the cell's inner edge (20 + 8).
        assert_eq!(value_x("BoreDM Drilling"), 154.0);
        assert_eq!(value_x("PA"), 154.0);
        assert_eq!(value_x("25-3332"), value_x("03/05/2025"));
        assert_eq!(value_x("25-3332"), 20.0 + 280.0 + 8.0 + 130.0 + 6.0);
    }

    #[test]
    fn centered_children_split_the_slack() {
        let document = compose();
        let page = sample_layout(&document);
        let logo = page.region("logo").expect("logo row");
        let placed_graphic = page
            .placements
            .iter()
            .find_map(|placement| match placement {
                Placement::Graphic { rect, graphic } if graphic.width == 60.0 => Some(*rect),
                _ => None,
            })
            .expect("drill icon");
        assert_eq!(placed_graphic.y, logo.y + (logo.height - 48.0) / 2.0);
        assert!(placed_graphic.x > logo.x);
    }

    #[test]
    fn regions_follow_document_order() {
        let document = compose();
        let page = sample_layout(&document);
        let names: Vec<&str> = page.regions().map(|(name, _)| name).collect();
        assert_eq!(names.first(), Some(&"header"));
        assert_eq!(names.last(), Some(&"footer-right"));
        let position = |name: &str| names.iter().position(|region| *region == name);
        assert!(position("grid-row-1") < position("grid-row-4"));
        assert!(position("left-grid") < position("remarks"));
        assert!(page.regions().all(|(_, rect)| rect.width >= 0.0 && rect.height >= 0.0));
    }

    #[test]
    fn layout_is_deterministic() {
        let document = compose();
        assert_eq!(sample_layout(&document), sample_layout(&document));
    }
}
