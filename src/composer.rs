//! Builds the boring log layout tree from metrics and field values.
//!
//! Composition is a single pure pass: the same metrics and fields always produce the same tree.

use log::debug;

use crate::fields::{display, BoringLogFields, CellColumn, LabeledCellSpec};
use crate::graphic::{drill_icon, water_icon};
use crate::metrics::FormMetrics;
use crate::node::{Container, Document, LayoutNode, PageNode, TextLeaf};
use crate::styles::StyleSheet;

/// Name under which the rendered form is offered for download.
pub const DEFAULT_FILE_NAME: &str = "BoreDM-B17.pdf";

const BRAND_PRIMARY: &str = "BORE";
const BRAND_ACCENT: &str = "DM";

/// Maps metrics and field values onto a renderable [`Document`].
#[derive(Clone, Debug)]
pub struct DocumentComposer {
    metrics: FormMetrics,
    fields: BoringLogFields,
    file_name: String,
    styles: StyleSheet,
}

impl DocumentComposer {
    /// Creates a composer for the given metrics and field values.
    pub fn new(metrics: FormMetrics, fields: BoringLogFields) -> Self {
        let styles = StyleSheet::new(&metrics);
        Self {
            metrics,
            fields,
            file_name: DEFAULT_FILE_NAME.to_owned(),
            styles,
        }
    }

    /// Overrides the download file name and returns the updated composer.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Composes the single-page document.
    pub fn compose(&self) -> Document {
        let page = PageNode {
            width: self.metrics.page_width,
            height: self.metrics.page_height,
            padding: self.metrics.page_padding,
            base_font_size: self.metrics.base_font_size,
            children: vec![self.header(), self.body(), self.footer()],
        };

        let title = format!(
            "Boring Log {} - {}",
            display(self.fields.boring_id.as_deref()),
            display(self.fields.project_title.as_deref())
        );
        let document = Document::new(title, self.file_name.clone(), page);
        debug!(
            "composed boring log '{}' with {} nodes",
            document.title(),
            document.root().node_count()
        );
        document
    }

    fn text(&self, content: &str) -> TextLeaf {
        TextLeaf::new(content, self.styles.text)
    }

    fn header(&self) -> LayoutNode {
        let s = &self.styles;

        let logo = Container::new(s.logo_row)
            .named("logo")
            .child(drill_icon())
            .child(TextLeaf::new(BRAND_PRIMARY, s.logo_primary))
            .child(TextLeaf::new(BRAND_ACCENT, s.logo_accent).with_margin(s.logo_accent_margin));

        let left = Container::new(s.header_left)
            .named("header-left")
            .child(LayoutNode::Row(logo));

        let mid = Container::new(s.header_mid)
            .named("header-mid")
            .child(
                TextLeaf::new(display(self.fields.project_title.as_deref()), s.title)
                    .with_margin(s.title_margin),
            )
            .child(TextLeaf::new(
                display(self.fields.project_location.as_deref()),
                s.subtitle,
            ));

        let right = Container::new(s.header_right)
            .named("header-right")
            .child(
                TextLeaf::new(display(self.fields.boring_id.as_deref()), s.boring_id)
                    .with_margin(s.boring_id_margin),
            )
            .child(TextLeaf::new("Page 1 of 1", s.page_label));

        LayoutNode::Row(
            Container::new(s.header)
                .named("header")
                .child(LayoutNode::Column(left))
                .child(LayoutNode::Column(mid))
                .child(LayoutNode::Column(right)),
        )
    }

    fn grid_rows(&self) -> Vec<[LabeledCellSpec; 2]> {
        let f = &self.fields;
        vec![
            [
                LabeledCellSpec::new("Drilling Firm:", f.drilling_firm.as_deref()),
                LabeledCellSpec::new("Project No.:", f.project_no.as_deref())
                    .in_column(CellColumn::Right)
                    .last(),
            ],
            [
                LabeledCellSpec::new("Driller:", f.driller.as_deref()),
                LabeledCellSpec::new("Date Drilled:", f.date_drilled.as_deref())
                    .in_column(CellColumn::Right)
                    .last(),
            ],
            [
                LabeledCellSpec::new("Logged By:", f.logged_by.as_deref()),
                LabeledCellSpec::new("Boring Depth:", f.boring_depth.as_deref())
                    .in_column(CellColumn::Right)
                    .last(),
            ],
            // Sits on the footer strip, whose top border closes the grid.
            [
                LabeledCellSpec::new("Water :", f.water_level.as_deref())
                    .with_icon(water_icon())
                    .without_bottom_border(),
                LabeledCellSpec::new("Boring Elevation:", f.boring_elevation.as_deref())
                    .in_column(CellColumn::Right)
                    .last()
                    .without_bottom_border(),
            ],
        ]
    }

    fn body(&self) -> LayoutNode {
        let s = &self.styles;

        let rows = self
            .grid_rows()
            .into_iter()
            .enumerate()
            .map(|(index, cells)| {
                LayoutNode::Row(
                    Container::new(s.grid_row)
                        .named(format!("grid-row-{}", index + 1))
                        .children(cells.iter().map(|cell| self.labeled_cell(cell))),
                )
            });

        let grid = Container::new(s.left_grid).named("left-grid").children(rows);

        let remarks_top = Container::new(s.remarks_top)
            .named("remarks-top")
            .child(self.text("Remarks:"))
            .child(self.text(display(self.fields.remarks.as_deref())));

        let remarks = Container::new(s.remarks)
            .named("remarks")
            .child(LayoutNode::Column(remarks_top))
            .child(LayoutNode::Column(Container::new(s.remarks_fill).named("remarks-fill")));

        LayoutNode::Row(
            Container::new(s.table_row)
                .named("body")
                .child(LayoutNode::Column(grid))
                .child(LayoutNode::Column(remarks)),
        )
    }

    /// Expands a labeled cell into its bordered box, label box and value box.
    pub fn labeled_cell(&self, spec: &LabeledCellSpec) -> LayoutNode {
        let s = &self.styles;

        let mut cell_style = s.cell;
        if spec.suppresses_bottom_border() {
            cell_style.border.bottom = false;
        }
        if spec.is_last() {
            cell_style.border.right = false;
        }

        let mut label_box = Container::new(s.label_box(spec.column()));
        if let Some(icon) = spec.icon() {
            label_box = label_box.child(icon.clone());
        }
        label_box = label_box.child(self.text(spec.label()));

        let value_box = Container::new(s.value_box).child(self.text(spec.value()));

        let line = Container::new(s.line_row)
            .child(LayoutNode::Row(label_box))
            .child(LayoutNode::Column(value_box));

        LayoutNode::Column(
            Container::new(cell_style)
                .named(spec.label().trim_end_matches(':').trim().to_owned())
                .child(LayoutNode::Row(line)),
        )
    }

    fn footer(&self) -> LayoutNode {
        let s = &self.styles;
        let f = &self.fields;

        let hammer = Container::new(s.line_row)
            .child(self.text("Hammer Type:"))
            .child(LayoutNode::Row(Container::new(s.value_gap)))
            .child(self.text(display(f.hammer_type.as_deref())));

        let address = Container::new(s.line_row)
            .child(LayoutNode::Column(
                Container::new(s.label_box(CellColumn::Right)).child(self.text("Brand Address:")),
            ))
            .child(LayoutNode::Column(
                Container::new(s.value_box).child(self.text(display(f.brand_address.as_deref()))),
            ));

        LayoutNode::Row(
            Container::new(s.final_row)
                .named("footer")
                .child(LayoutNode::Column(
                    Container::new(s.final_left_cell)
                        .named("footer-left")
                        .child(LayoutNode::Row(hammer)),
                ))
                .child(LayoutNode::Column(
                    Container::new(s.final_right_cell)
                        .named("footer-right")
                        .child(LayoutNode::Row(address)),
                )),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Length;

    fn compose(fields: BoringLogFields) -> Document {
        DocumentComposer::new(FormMetrics::default(), fields).compose()
    }

    fn container_height(node: &LayoutNode) -> f64 {
        node.box_style()
            .and_then(|style| style.height)
            .expect("fixed height")
    }

    fn fixed_width(node: &LayoutNode) -> f64 {
        match node.box_style().map(|style| style.width) {
            Some(Length::Fixed(width)) => width,
            other => panic!("expected fixed width, got {:?}", other),
        }
    }

    #[test]
    fn page_holds_header_body_and_footer() {
        let document = compose(BoringLogFields::sample());
        let page = document.page();
        assert_eq!((page.width, page.height), (792.0, 612.0));
        let names: Vec<_> = page.children.iter().filter_map(LayoutNode::name).collect();
        assert_eq!(names, vec!["header", "body", "footer"]);
        assert_eq!(document.file_name(), "BoreDM-B17.pdf");
    }

    #[test]
    fn header_title_column_takes_the_remainder() {
        let metrics = FormMetrics::default().with_page_padding(32.0);
        let document = DocumentComposer::new(metrics.clone(), BoringLogFields::sample()).compose();
        let header = document.root().find("header").expect("header");
        let total: f64 = header.children().iter().map(fixed_width).sum();
        assert_eq!(total, metrics.usable_width());
        let mid = document.root().find("header-mid").expect("title column");
        assert_eq!(fixed_width(mid), 728.0 - 340.0);
    }

    #[test]
    fn only_the_last_cell_of_each_row_drops_its_right_border() {
        let document = compose(BoringLogFields::sample());
        for index in 1..=4 {
            let row = document
                .root()
                .find(&format!("grid-row-{}", index))
                .expect("grid row");
            let cells = row.children();
            let suppressed: Vec<bool> = cells
                .iter()
                .map(|cell| !cell.box_style().expect("cell style").border.right)
                .collect();
            assert_eq!(suppressed.iter().filter(|&&s| s).count(), 1);
            assert_eq!(suppressed.last(), Some(&true));
        }
    }

    #[test]
    fn row_above_footer_drops_its_bottom_border() {
        let document = compose(BoringLogFields::sample());
        for index in 1..=3 {
            let row = document
                .root()
                .find(&format!("grid-row-{}", index))
                .expect("grid row");
            assert!(row
                .children()
                .iter()
                .all(|cell| cell.box_style().expect("cell style").border.bottom));
        }
        let last = document.root().find("grid-row-4").expect("water row");
        assert!(last
            .children()
            .iter()
            .all(|cell| !cell.box_style().expect("cell style").border.bottom));
        let footer = document.root().find("footer").expect("footer");
        assert!(footer.box_style().expect("footer style").border.top);
    }

    #[test]
    fn composition_is_deterministic() {
        let first = compose(BoringLogFields::sample());
        let second = compose(BoringLogFields::sample());
        assert_eq!(first.root().node_count(), second.root().node_count());
        assert_eq!(first, second);
    }

    #[test]
    fn missing_values_render_placeholders() {
        let document = compose(BoringLogFields::new());
        let depth = document.root().find("Boring Depth").expect("depth cell");
        assert_eq!(depth.texts(), vec!["Boring Depth:", "-"]);
        assert_eq!(container_height(depth), 32.0);
        let remarks = document.root().find("remarks-top").expect("remarks");
        assert_eq!(remarks.texts(), vec!["Remarks:", "-"]);
    }

    #[test]
    fn remarks_panel_spans_the_grid() {
        let document = compose(BoringLogFields::sample());
        let top = document.root().find("remarks-top").expect("remarks top");
        let fill = document.root().find("remarks-fill").expect("remarks fill");
        assert_eq!(container_height(top) + container_height(fill), 4.0 * 32.0);
    }

    #[test]
    fn water_cell_carries_its_icon() {
        let document = compose(BoringLogFields::sample());
        let water = document.root().find("Water").expect("water cell");
        assert!(water
            .walk()
            .any(|node| matches!(node, LayoutNode::Graphic(graphic) if graphic.width == 16.0)));
    }

    #[test]
    fn end_to_end_field_record() {
        let fields: BoringLogFields = serde_json::from_str(
            r#"{
                "drillingFirm": "BoreDM Drilling",
                "projectNo": "25-3332",
                "driller": "PA",
                "dateDrilled": "03/05/2025",
                "loggedBy": "LA",
                "water": "N/A",
                "boringElevation": "N/A",
                "brandAddress": "4909 N. 44th St, Phoenix, AZ 85018"
            }"#,
        )
        .expect("valid field record");
        let document = compose(fields);

        let footer_left = document.root().find("footer-left").expect("footer left");
        assert_eq!(footer_left.texts(), vec!["Hammer Type:", "-"]);
        let depth = document.root().find("Boring Depth").expect("depth cell");
        assert_eq!(depth.texts().last(), Some(&"-"));
        let footer_right = document.root().find("footer-right").expect("footer right");
        assert_eq!(
            footer_right.texts(),
            vec!["Brand Address:", "4909 N. 44th St, Phoenix, AZ 85018"]
        );
        assert_eq!(
            document
                .root()
                .walk()
                .filter(|node| matches!(node, LayoutNode::Page(_)))
                .count(),
            1
        );
    }
}
