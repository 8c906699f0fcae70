//! Reconciliation report types and text formatting.

use serde::Serialize;
use std::fmt;

/// What a reconciliation did, or would do, to the shape list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReconcileReport {
    /// Index of the edited shape, when the edit targeted an active shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_index: Option<usize>,
    /// Fields overwritten on the active shape.
    pub changes: Vec<FieldChange>,
    /// Number of shapes appended to the list.
    pub appended: usize,
}

/// One overwritten field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: String,
    /// Previous value; absent when the field did not exist on the old type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    pub after: String,
}

impl FieldChange {
    pub fn new(field: impl Into<String>, before: Option<String>, after: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            before,
            after: after.into(),
        }
    }
}

impl ReconcileReport {
    /// True if applying the report leaves the list untouched.
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty() && self.appended == 0
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unchanged() {
            return writeln!(f, "No changes");
        }

        if let Some(index) = self.active_index {
            writeln!(
                f,
                "Active shape #{}: {} field(s) changed",
                index,
                self.changes.len()
            )?;
        }
        for change in &self.changes {
            match &change.before {
                Some(before) => writeln!(f, "  {}: {} -> {}", change.field, before, change.after)?,
                None => writeln!(f, "  {}: (unset) -> {}", change.field, change.after)?,
            }
        }

        if self.appended > 0 {
            writeln!(f, "Appended {} new shape(s)", self.appended)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_report_text() {
        let report = ReconcileReport::default();
        assert_eq!(report.to_string(), "No changes\n");
    }

    #[test]
    fn test_active_edit_report_text() {
        let report = ReconcileReport {
            active_index: Some(1),
            changes: vec![FieldChange::new("x1", Some("10".into()), "12")],
            appended: 0,
        };
        let text = report.to_string();
        assert!(text.contains("Active shape #1: 1 field(s) changed"));
        assert!(text.contains("x1: 10 -> 12"));
    }

    #[test]
    fn test_report_json_skips_missing_fields() {
        let report = ReconcileReport {
            active_index: None,
            changes: vec![],
            appended: 2,
        };
        let json = serde_json::to_value(&report).expect("serialize report");
        assert!(json.get("active_index").is_none());
        assert_eq!(json["appended"], 2);
    }
}
