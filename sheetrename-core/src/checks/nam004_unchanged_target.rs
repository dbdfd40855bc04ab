//! NAM004: Target name unchanged

use super::{CheckCategory, PlanCheck};
use crate::error::Result;
use crate::issue::{Issue, IssueScope, Severity};
use crate::renamer::RenamePlan;

pub struct UnchangedTargetCheck;

impl PlanCheck for UnchangedTargetCheck {
    fn id(&self) -> &str {
        "NAM004"
    }

    fn name(&self) -> &str {
        "Target name unchanged"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Naming
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>> {
        Ok(plan
            .entries
            .iter()
            .filter(|entry| entry.is_unchanged())
            .map(|entry| {
                Issue::new(
                    self.id(),
                    IssueScope::Row(entry.row),
                    format!("{} already has the target name", entry.source_name()),
                    self.severity(),
                )
            })
            .collect())
    }
}
