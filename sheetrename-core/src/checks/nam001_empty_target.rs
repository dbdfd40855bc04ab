//! NAM001: Empty target name

use super::{CheckCategory, PlanCheck};
use crate::error::Result;
use crate::issue::{Issue, IssueScope, Severity};
use crate::renamer::RenamePlan;

pub struct EmptyTargetCheck;

impl PlanCheck for EmptyTargetCheck {
    fn id(&self) -> &str {
        "NAM001"
    }

    fn name(&self) -> &str {
        "Empty target name"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Naming
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn mandatory(&self) -> bool {
        true
    }

    fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>> {
        Ok(plan
            .entries
            .iter()
            .filter(|entry| entry.target_stem().is_empty())
            .map(|entry| {
                Issue::new(
                    self.id(),
                    IssueScope::Row(entry.row),
                    format!(
                        "Template renders an empty name for {}",
                        entry.source_name()
                    ),
                    self.severity(),
                )
            })
            .collect())
    }
}
