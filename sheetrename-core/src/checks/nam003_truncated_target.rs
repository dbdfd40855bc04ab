//! NAM003: Target name truncated

use super::{CheckCategory, PlanCheck};
use crate::error::Result;
use crate::issue::{Issue, IssueScope, Severity};
use crate::renamer::RenamePlan;

pub struct TruncatedTargetCheck;

impl PlanCheck for TruncatedTargetCheck {
    fn id(&self) -> &str {
        "NAM003"
    }

    fn name(&self) -> &str {
        "Target name truncated"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Naming
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>> {
        Ok(plan
            .entries
            .iter()
            .filter(|entry| entry.truncated)
            .map(|entry| {
                Issue::new(
                    self.id(),
                    IssueScope::Row(entry.row),
                    format!("Name cut to '{}'", entry.target_name()),
                    self.severity(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::plan;
    use std::path::Path;

    #[test]
    fn test_truncated() {
        let mut plan = plan(Path::new("/docs"), &[("a.pdf", "x.pdf"), ("b.pdf", "y.pdf")]);
        plan.entries[1].truncated = true;
        let issues = TruncatedTargetCheck.check(&plan).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].scope, IssueScope::Row(1));
    }
}
