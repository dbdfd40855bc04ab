//! CEL001: Empty cell value in name

use super::{CheckCategory, PlanCheck};
use crate::error::Result;
use crate::issue::{Issue, IssueScope, Severity};
use crate::renamer::RenamePlan;

pub struct EmptyCellValueCheck;

impl PlanCheck for EmptyCellValueCheck {
    fn id(&self) -> &str {
        "CEL001"
    }

    fn name(&self) -> &str {
        "Empty cell value in name"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Cells
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>> {
        Ok(plan
            .entries
            .iter()
            .filter(|entry| !entry.empty_columns.is_empty())
            .map(|entry| {
                Issue::new(
                    self.id(),
                    IssueScope::Row(entry.row),
                    format!("Empty value in column(s): {}", entry.empty_columns.join(", ")),
                    self.severity(),
                )
            })
            .collect())
    }
}
