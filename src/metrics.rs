//! Geometric style tokens for the boring log form.
//!
//! All values are expressed in PDF points (1/72 inch).  Only independent tokens are stored; every
//! width or height that depends on another one is computed on demand from the totals, so changing
//! the page size or the margin can never leave two columns out of sync.

use serde::Deserialize;
use thiserror::Error;

use crate::fields::CellColumn;

/// Width of a landscape US Letter sheet in points.
pub const LETTER_LANDSCAPE_WIDTH: f64 = 792.0;
/// Height of a landscape US Letter sheet in points.
pub const LETTER_LANDSCAPE_HEIGHT: f64 = 612.0;
/// Label/value rows in the body grid.
pub const GRID_ROWS: usize = 4;

/// Independent geometry of the form.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormMetrics {
    pub page_width: f64,
    pub page_height: f64,
    pub page_padding: f64,
    pub header_height: f64,
    pub header_left_width: f64,
    pub header_right_width: f64,
    pub base_font_size: u8,
    pub row_height: f64,
    pub left_grid_width: f64,
    pub label_width_left: f64,
    pub label_width_right: f64,
    pub value_gap: f64,
    pub cell_padding_x: f64,
    pub cell_padding_top: f64,
    /// Extra height of the remarks label block beyond a single grid row.
    pub remarks_overlap: f64,
    pub remarks_padding_top: f64,
}

impl Default for FormMetrics {
    fn default() -> Self {
        Self {
            page_width: LETTER_LANDSCAPE_WIDTH,
            page_height: LETTER_LANDSCAPE_HEIGHT,
            page_padding: 20.0,
            header_height: 100.0,
            header_left_width: 220.0,
            header_right_width: 120.0,
            base_font_size: 14,
            row_height: 32.0,
            left_grid_width: 560.0,
            label_width_left: 120.0,
            label_width_right: 130.0,
            value_gap: 6.0,
            cell_padding_x: 8.0,
            cell_padding_top: 6.0,
            remarks_overlap: 8.0,
            remarks_padding_top: 2.0,
        }
    }
}

impl FormMetrics {
    /// Sets the page padding and returns the updated metrics.
    pub fn with_page_padding(mut self, padding: f64) -> Self {
        self.page_padding = padding;
        self
    }

    /// Sets the grid row height and returns the updated metrics.
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Sets the physical page size and returns the updated metrics.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Page width minus the padding on both sides.
    pub fn usable_width(&self) -> f64 {
        self.page_width - 2.0 * self.page_padding
    }

    /// Page height minus the padding on both sides.
    pub fn usable_height(&self) -> f64 {
        self.page_height - 2.0 * self.page_padding
    }

    /// Width of the header title column: whatever the logo and page-number columns leave over.
    pub fn header_mid_width(&self) -> f64 {
        self.usable_width() - self.header_left_width - self.header_right_width
    }

    /// Width of the remarks panel beside the label/value grid.
    pub fn remarks_width(&self) -> f64 {
        self.usable_width() - self.left_grid_width
    }

    /// Width of a single grid column.
    pub fn column_width(&self) -> f64 {
        self.left_grid_width / 2.0
    }

    /// Combined height of all grid rows.
    pub fn grid_height(&self) -> f64 {
        GRID_ROWS as f64 * self.row_height
    }

    /// Height of the remarks label block.
    pub fn remarks_top_height(&self) -> f64 {
        self.row_height + self.remarks_overlap
    }

    /// Height of the blank remarks area, sized so the panel ends level with the grid.
    pub fn remarks_fill_height(&self) -> f64 {
        self.grid_height() - self.remarks_top_height()
    }

    /// Width of the brand address cell in the footer strip.
    pub fn footer_right_width(&self) -> f64 {
        self.column_width() + self.remarks_width()
    }

    /// Label box width for the given grid column.
    pub fn label_width(&self, column: CellColumn) -> f64 {
        match column {
            CellColumn::Left => self.label_width_left,
            CellColumn::Right => self.label_width_right,
        }
    }

    /// Total height used by header, grid and footer strip.
    pub fn content_height(&self) -> f64 {
        self.header_height + self.grid_height() + self.row_height
    }

    /// Every stored length with its name, in declaration order.
    fn stored_lengths(&self) -> [(&'static str, f64); 15] {
        [
            ("page width", self.page_width),
            ("page height", self.page_height),
            ("page padding", self.page_padding),
            ("header height", self.header_height),
            ("header left width", self.header_left_width),
            ("header right width", self.header_right_width),
            ("row height", self.row_height),
            ("left grid width", self.left_grid_width),
            ("left label width", self.label_width_left),
            ("right label width", self.label_width_right),
            ("value gap", self.value_gap),
            ("cell horizontal padding", self.cell_padding_x),
            ("cell top padding", self.cell_padding_top),
            ("remarks overlap", self.remarks_overlap),
            ("remarks top padding", self.remarks_padding_top),
        ]
    }

    /// Checks that every length is finite and non-negative, that derived dimensions stay
    /// non-negative and that labels fit their cells.
    pub fn validate(&self) -> Result<(), MetricsError> {
        for (name, value) in self.stored_lengths() {
            if !value.is_finite() {
                return Err(MetricsError::NonFinite { name });
            }
            if value < 0.0 {
                return Err(MetricsError::Negative { name, value });
            }
        }

        if self.page_width < self.page_height {
            return Err(MetricsError::NotLandscape {
                width: self.page_width,
                height: self.page_height,
            });
        }

        let derived = [
            ("usable width", self.usable_width()),
            ("header title column", self.header_mid_width()),
            ("remarks column", self.remarks_width()),
            ("remarks fill", self.remarks_fill_height()),
        ];
        for (name, value) in derived {
            if value < 0.0 {
                return Err(MetricsError::Negative { name, value });
            }
        }

        for (name, label_width) in [
            ("left label", self.label_width_left),
            ("right label", self.label_width_right),
        ] {
            let needed = label_width + self.value_gap + 2.0 * self.cell_padding_x;
            if needed > self.column_width() {
                return Err(MetricsError::LabelOverflow {
                    name,
                    needed,
                    available: self.column_width(),
                });
            }
        }

        if self.content_height() > self.usable_height() {
            return Err(MetricsError::Negative {
                name: "vertical space below the form",
                value: self.usable_height() - self.content_height(),
            });
        }

        Ok(())
    }
}

/// Inconsistent geometry detected by [`FormMetrics::validate`].
#[derive(Error, Clone, Debug, PartialEq)]
pub enum MetricsError {
    /// A length is NaN or infinite.
    #[error("{name} is not a finite number")]
    NonFinite { name: &'static str },
    /// A stored or derived dimension is negative.
    #[error("{name} would be negative ({value:.1}pt)")]
    Negative { name: &'static str, value: f64 },
    /// A label box plus gap and padding is wider than its grid column.
    #[error("{name} needs {needed:.1}pt but the column is only {available:.1}pt wide")]
    LabelOverflow {
        name: &'static str,
        needed: f64,
        available: f64,
    },
    /// The form is laid out for landscape sheets only.
    #[error("page {width:.1}x{height:.1}pt is not landscape")]
    NotLandscape { width: f64, height: f64 },
}
