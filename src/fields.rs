//! Field values printed on the form and the labeled cell records built from them.

use serde::Deserialize;

use crate::graphic::VectorGraphic;

/// Text printed in place of a missing value so the grid keeps its shape.
pub const PLACEHOLDER: &str = "-";

/// Values printed on the boring log.  Every field is optional; missing or blank values print as
/// [`PLACEHOLDER`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoringLogFields {
    pub project_title: Option<String>,
    pub project_location: Option<String>,
    pub boring_id: Option<String>,
    pub drilling_firm: Option<String>,
    pub project_no: Option<String>,
    pub driller: Option<String>,
    pub date_drilled: Option<String>,
    pub logged_by: Option<String>,
    pub boring_depth: Option<String>,
    #[serde(alias = "water")]
    pub water_level: Option<String>,
    pub boring_elevation: Option<String>,
    pub hammer_type: Option<String>,
    pub brand_address: Option<String>,
    pub remarks: Option<String>,
}

impl BoringLogFields {
    /// Creates a record with every field missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The boring log for B-17 at Riverside Condominiums.
    pub fn sample() -> Self {
        Self {
            project_title: Some("Riverside Condominiums".to_owned()),
            project_location: Some("General Location - Project".to_owned()),
            boring_id: Some("B-17".to_owned()),
            drilling_firm: Some("BoreDM Drilling".to_owned()),
            project_no: Some("25-3332".to_owned()),
            driller: Some("PA".to_owned()),
            date_drilled: Some("03/05/2025".to_owned()),
            logged_by: Some("LA".to_owned()),
            boring_depth: None,
            water_level: Some("N/A".to_owned()),
            boring_elevation: Some("N/A".to_owned()),
            hammer_type: None,
            brand_address: Some("4909 N. 44th St, Phoenix, AZ 85018".to_owned()),
            remarks: None,
        }
    }
}

/// Returns the value to print for an optional field.
pub fn display(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => PLACEHOLDER,
    }
}

/// Grid column a cell sits in; selects the label width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellColumn {
    #[default]
    Left,
    Right,
}

/// A label/value pair that expands into a bordered cell.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledCellSpec {
    label: String,
    value: String,
    column: CellColumn,
    icon: Option<VectorGraphic>,
    last: bool,
    suppress_bottom_border: bool,
}

impl LabeledCellSpec {
    /// Creates a left-column cell; absent values become the placeholder.
    pub fn new(label: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            label: label.into(),
            value: display(value).to_owned(),
            column: CellColumn::Left,
            icon: None,
            last: false,
            suppress_bottom_border: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn column(&self) -> CellColumn {
        self.column
    }

    pub fn icon(&self) -> Option<&VectorGraphic> {
        self.icon.as_ref()
    }

    /// Whether this is the last cell of its row; last cells drop their right border.
    pub fn is_last(&self) -> bool {
        self.last
    }

    pub fn suppresses_bottom_border(&self) -> bool {
        self.suppress_bottom_border
    }

    pub fn in_column(mut self, column: CellColumn) -> Self {
        self.column = column;
        self
    }

    pub fn with_icon(mut self, icon: VectorGraphic) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn last(mut self) -> Self {
        self.last = true;
        self
    }

    pub fn without_bottom_border(mut self) -> Self {
        self.suppress_bottom_border = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_values_use_placeholder() {
        assert_eq!(display(None), "-");
        assert_eq!(display(Some("   ")), "-");
        assert_eq!(display(Some("N/A")), "N/A");
    }

    #[test]
    fn cell_spec_substitutes_placeholder() {
        let cell = LabeledCellSpec::new("Boring Depth:", None)
            .in_column(CellColumn::Right)
            .last();
        assert_eq!(cell.value(), "-");
        assert!(cell.is_last());
        assert_eq!(cell.column(), CellColumn::Right);
    }

    #[test]
    fn deserializes_camel_case_and_water_alias() {
        let fields: BoringLogFields = serde_json::from_str(
            r#"{ "drillingFirm": "BoreDM Drilling", "projectNo": "25-3332", "water": "N/A" }"#,
        )
        .expect("valid json");
        assert_eq!(fields.drilling_firm.as_deref(), Some("BoreDM Drilling"));
        assert_eq!(fields.project_no.as_deref(), Some("25-3332"));
        assert_eq!(fields.water_level.as_deref(), Some("N/A"));
        assert!(fields.boring_depth.is_none());
    }
}
