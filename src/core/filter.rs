use crate::models::record::ChecklistRecord;

/// Exact-match filters on title, area and assignee, combined with AND.
/// An unset filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub title: Option<String>,
    pub area: Option<String>,
    pub assigned_to: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.area.is_none() && self.assigned_to.is_none()
    }

    pub fn matches(&self, rec: &ChecklistRecord) -> bool {
        fn eq(want: &Option<String>, have: &str) -> bool {
            want.as_deref().is_none_or(|w| w == have)
        }

        eq(&self.title, &rec.title)
            && eq(&self.area, &rec.area)
            && eq(&self.assigned_to, &rec.assigned_to)
    }

    /// Keep the matching records, preserving their order.
    pub fn apply(&self, records: Vec<ChecklistRecord>) -> Vec<ChecklistRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
