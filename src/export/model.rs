// src/export/model.rs

use crate::models::record::ChecklistRecord;
use serde::{Serialize, Serializer};

/// Pass/fail glyph shown in the Check column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMark {
    Accepted,
    Rejected,
}

impl CheckMark {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            CheckMark::Accepted
        } else {
            CheckMark::Rejected
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            CheckMark::Accepted => "✓",
            CheckMark::Rejected => "✗",
        }
    }
}

impl Serialize for CheckMark {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.glyph())
    }
}

/// Display columns, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    No,
    Title,
    Area,
    AssignedTo,
    Date,
    Finding,
    Check,
    Recommendation,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::No,
        Column::Title,
        Column::Area,
        Column::AssignedTo,
        Column::Date,
        Column::Finding,
        Column::Check,
        Column::Recommendation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Column::No => "No",
            Column::Title => "Title",
            Column::Area => "Area",
            Column::AssignedTo => "Assigned To",
            Column::Date => "Date",
            Column::Finding => "Finding",
            Column::Check => "Check",
            Column::Recommendation => "Recommendation",
        }
    }

    /// Free-text columns that may span several lines.
    pub fn is_long_text(&self) -> bool {
        matches!(self, Column::Finding | Column::Recommendation)
    }
}

/// One export row: stored fields relabeled, nulls blank-filled, numbered.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PresentedRow {
    #[serde(rename = "No")]
    pub no: usize,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "Assigned To")]
    pub assigned_to: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Finding")]
    pub finding: String,
    #[serde(rename = "Check")]
    pub check: CheckMark,
    #[serde(rename = "Recommendation")]
    pub recommendation: String,
}

impl PresentedRow {
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::No => self.no.to_string(),
            Column::Title => self.title.clone(),
            Column::Area => self.area.clone(),
            Column::AssignedTo => self.assigned_to.clone(),
            Column::Date => self.date.clone(),
            Column::Finding => self.finding.clone(),
            Column::Check => self.check.glyph().to_string(),
            Column::Recommendation => self.recommendation.clone(),
        }
    }
}

/// Header labels for XLSX / PDF.
pub(crate) fn get_headers() -> Vec<&'static str> {
    Column::ALL.iter().map(Column::label).collect()
}

/// Convert a presented row into cell strings, in column order.
pub(crate) fn row_to_values(r: &PresentedRow) -> Vec<String> {
    Column::ALL.iter().map(|c| r.value(*c)).collect()
}

/// Map stored records to export rows, keeping the caller's order.
///
/// This is the only place where missing finding / recommendation text is
/// turned into empty strings.
pub fn present(records: &[ChecklistRecord]) -> Vec<PresentedRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| PresentedRow {
            no: i + 1,
            title: r.title.clone(),
            area: r.area.clone(),
            assigned_to: r.assigned_to.clone(),
            date: r.date.clone(),
            finding: r.finding.clone().unwrap_or_default(),
            check: CheckMark::from_passed(r.passed),
            recommendation: r.recommendation.clone().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, passed: bool, finding: Option<&str>) -> ChecklistRecord {
        ChecklistRecord {
            id,
            title: format!("item {id}"),
            area: "Gudang".into(),
            assigned_to: "Sari".into(),
            date: "2024-02-01".into(),
            finding: finding.map(str::to_string),
            passed,
            recommendation: None,
        }
    }

    #[test]
    fn numbers_rows_in_input_order() {
        let input = vec![
            record(7, true, None),
            record(3, false, None),
            record(11, true, None),
        ];
        let rows = present(&input);

        assert_eq!(rows.len(), input.len());
        assert_eq!(rows.iter().map(|r| r.no).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[1].title, "item 3");
    }

    #[test]
    fn maps_passed_to_glyph() {
        let rows = present(&[record(1, true, None), record(2, false, None)]);
        assert_eq!(rows[0].check, CheckMark::Accepted);
        assert_eq!(rows[0].check.glyph(), "✓");
        assert_eq!(rows[1].check, CheckMark::Rejected);
        assert_eq!(rows[1].check.glyph(), "✗");
    }

    #[test]
    fn blank_fills_missing_text() {
        let rows = present(&[record(1, false, None), record(2, false, Some("Retak\nBocor"))]);
        assert_eq!(rows[0].finding, "");
        assert_eq!(rows[0].recommendation, "");
        assert_eq!(rows[1].finding, "Retak\nBocor");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(present(&[]).is_empty());
    }

    #[test]
    fn values_follow_header_order() {
        let rows = present(&[record(1, true, Some("OK"))]);
        let values = row_to_values(&rows[0]);
        let headers = get_headers();

        assert_eq!(values.len(), headers.len());
        assert_eq!(headers[5], "Finding");
        assert_eq!(values[5], "OK");
        assert_eq!(headers[6], "Check");
        assert_eq!(values[6], "✓");
    }
}
