use serde::Serialize;

/// One audit checklist entry, as stored in the `items` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistRecord {
    pub id: i64,                        // ⇔ items.id (AUTOINCREMENT, never reused)
    pub title: String,                  // ⇔ items.title
    pub area: String,                   // ⇔ items.area
    pub assigned_to: String,            // ⇔ items.assigned_to
    pub date: String,                   // ⇔ items.date (TEXT "YYYY-MM-DD")
    pub finding: Option<String>,        // ⇔ items.finding (nullable, multi-line)
    pub passed: bool,                   // ⇔ items.passed (0/1)
    pub recommendation: Option<String>, // ⇔ items.recommendation (nullable, multi-line)
}

/// Field values for a record that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub area: String,
    pub assigned_to: String,
    pub date: String,
    pub finding: Option<String>,
    pub passed: bool,
    pub recommendation: Option<String>,
}

/// Partial update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub area: Option<String>,
    pub assigned_to: Option<String>,
    pub date: Option<String>,
    pub finding: Option<String>,
    pub passed: Option<bool>,
    pub recommendation: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.area.is_none()
            && self.assigned_to.is_none()
            && self.date.is_none()
            && self.finding.is_none()
            && self.passed.is_none()
            && self.recommendation.is_none()
    }
}
