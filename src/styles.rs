//! Named box and text styles of the form, derived from [`FormMetrics`].

use crate::fields::CellColumn;
use crate::metrics::FormMetrics;
use crate::node::{Alignment, BorderSides, BoxStyle, Edges, Rgb, TextStyle};

/// Brand grey used for the "DM" half of the logo.
pub const BRAND_GREY: Rgb = Rgb(0x8f, 0x8f, 0x8f);
/// Slightly lighter than black, used for the header subtitle.
pub const SUBTITLE_NEAR_BLACK: Rgb = Rgb(0x22, 0x22, 0x22);

const LOGO_FONT_SIZE: u8 = 26;
const TITLE_FONT_SIZE: u8 = 22;
const SUBTITLE_FONT_SIZE: u8 = 12;
const PAGE_LABEL_FONT_SIZE: u8 = 11;
const TITLE_GAP: f64 = 8.0;
const BORING_ID_GAP: f64 = 10.0;
const LOGO_WORD_GAP: f64 = 2.0;
const HEADER_MID_PADDING_X: f64 = 8.0;
const HEADER_RIGHT_PADDING_X: f64 = 6.0;

/// Style table for one set of metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSheet {
    pub header: BoxStyle,
    pub header_left: BoxStyle,
    pub header_mid: BoxStyle,
    pub header_right: BoxStyle,
    pub logo_row: BoxStyle,
    pub logo_primary: TextStyle,
    pub logo_accent: TextStyle,
    pub logo_accent_margin: Edges,
    pub title: TextStyle,
    pub title_margin: Edges,
    pub subtitle: TextStyle,
    pub boring_id: TextStyle,
    pub boring_id_margin: Edges,
    pub page_label: TextStyle,
    pub table_row: BoxStyle,
    pub left_grid: BoxStyle,
    pub grid_row: BoxStyle,
    pub cell: BoxStyle,
    pub line_row: BoxStyle,
    pub label_box_left: BoxStyle,
    pub label_box_right: BoxStyle,
    pub value_box: BoxStyle,
    pub text: TextStyle,
    pub remarks: BoxStyle,
    pub remarks_top: BoxStyle,
    pub remarks_fill: BoxStyle,
    pub final_row: BoxStyle,
    pub final_left_cell: BoxStyle,
    pub final_right_cell: BoxStyle,
    pub value_gap: BoxStyle,
}

impl StyleSheet {
    /// Derives every style from the given metrics.
    pub fn new(metrics: &FormMetrics) -> Self {
        let cell_padding =
            Edges::horizontal(metrics.cell_padding_x).with_top(metrics.cell_padding_top);
        let label_box = BoxStyle::new().align(Alignment::Center);

        Self {
            header: BoxStyle::new()
                .height(metrics.header_height)
                .border(BorderSides::ALL),
            header_left: BoxStyle::new()
                .width(metrics.header_left_width)
                .border(BorderSides::NONE.with_right(true))
                .centered(),
            header_mid: BoxStyle::new()
                .width(metrics.header_mid_width())
                .border(BorderSides::NONE.with_right(true))
                .padding(Edges::horizontal(HEADER_MID_PADDING_X))
                .centered(),
            header_right: BoxStyle::new()
                .width(metrics.header_right_width)
                .padding(Edges::horizontal(HEADER_RIGHT_PADDING_X))
                .centered(),
            logo_row: BoxStyle::new().width(metrics.header_left_width).centered(),
            logo_primary: TextStyle::new(LOGO_FONT_SIZE).bold(),
            logo_accent: TextStyle::new(LOGO_FONT_SIZE).bold().colored(BRAND_GREY),
            logo_accent_margin: Edges::ZERO.with_left(LOGO_WORD_GAP),
            title: TextStyle::new(TITLE_FONT_SIZE).bold().centered(),
            title_margin: Edges::ZERO.with_bottom(TITLE_GAP),
            subtitle: TextStyle::new(SUBTITLE_FONT_SIZE)
                .bold()
                .colored(SUBTITLE_NEAR_BLACK)
                .centered(),
            boring_id: TextStyle::new(LOGO_FONT_SIZE).bold().centered(),
            boring_id_margin: Edges::ZERO.with_bottom(BORING_ID_GAP),
            page_label: TextStyle::new(PAGE_LABEL_FONT_SIZE).centered(),
            table_row: BoxStyle::new().border(BorderSides::NONE.with_left(true).with_right(true)),
            left_grid: BoxStyle::new()
                .width(metrics.left_grid_width)
                .border(BorderSides::NONE.with_right(true)),
            grid_row: BoxStyle::new(),
            cell: BoxStyle::new()
                .width(metrics.column_width())
                .height(metrics.row_height)
                .border(BorderSides::NONE.with_right(true).with_bottom(true))
                .padding(cell_padding),
            line_row: BoxStyle::new(),
            label_box_left: label_box.width(metrics.label_width(CellColumn::Left)),
            label_box_right: label_box.width(metrics.label_width(CellColumn::Right)),
            value_box: BoxStyle::new().margin(Edges::ZERO.with_left(metrics.value_gap)),
            text: TextStyle::new(metrics.base_font_size),
            remarks: BoxStyle::new().width(metrics.remarks_width()),
            remarks_top: BoxStyle::new()
                .height(metrics.remarks_top_height())
                .padding(
                    Edges::horizontal(metrics.cell_padding_x).with_top(metrics.remarks_padding_top),
                ),
            remarks_fill: BoxStyle::new().height(metrics.remarks_fill_height()),
            final_row: BoxStyle::new().border(BorderSides::ALL),
            final_left_cell: BoxStyle::new()
                .width(metrics.column_width())
                .height(metrics.row_height)
                .border(BorderSides::NONE.with_right(true))
                .padding(cell_padding),
            final_right_cell: BoxStyle::new()
                .width(metrics.footer_right_width())
                .height(metrics.row_height)
                .padding(cell_padding),
            value_gap: BoxStyle::new().width(metrics.value_gap),
        }
    }

    /// Label box style for the given grid column.
    pub fn label_box(&self, column: CellColumn) -> BoxStyle {
        match column {
            CellColumn::Left => self.label_box_left,
            CellColumn::Right => self.label_box_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Length;

    #[test]
    fn header_columns_fill_usable_width() {
        let metrics = FormMetrics::default().with_page_padding(30.0);
        let sheet = StyleSheet::new(&metrics);
        let widths: f64 = [sheet.header_left, sheet.header_mid, sheet.header_right]
            .iter()
            .map(|style| match style.width {
                Length::Fixed(width) => width,
                Length::Fill => 0.0,
            })
            .sum();
        assert_eq!(widths, metrics.usable_width());
    }

    #[test]
    fn cells_default_to_right_and_bottom_borders() {
        let sheet = StyleSheet::new(&FormMetrics::default());
        assert_eq!(
            sheet.cell.border,
            BorderSides::NONE.with_right(true).with_bottom(true)
        );
        assert_eq!(sheet.label_box(CellColumn::Right).width, Length::Fixed(130.0));
    }
}
