//! CNT001: File/row count mismatch

use super::{CheckCategory, PlanCheck};
use crate::error::Result;
use crate::issue::{Issue, IssueScope, Severity};
use crate::renamer::RenamePlan;

pub struct CountMismatchCheck;

impl PlanCheck for CountMismatchCheck {
    fn id(&self) -> &str {
        "CNT001"
    }

    fn name(&self) -> &str {
        "File/row count mismatch"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Count
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn mandatory(&self) -> bool {
        true
    }

    fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>> {
        if plan.file_count == plan.row_count {
            return Ok(Vec::new());
        }

        Ok(vec![Issue::new(
            self.id(),
            IssueScope::Batch,
            format!(
                "Folder has {} file(s) but the spreadsheet has {} row(s)",
                plan.file_count, plan.row_count
            ),
            self.severity(),
        )])
    }
}
