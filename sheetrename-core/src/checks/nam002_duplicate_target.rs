//! NAM002: Duplicate target name

use super::{CheckCategory, PlanCheck};
use crate::error::Result;
use crate::issue::{Issue, IssueScope, Severity};
use crate::renamer::RenamePlan;
use std::collections::HashMap;

pub struct DuplicateTargetCheck;

impl PlanCheck for DuplicateTargetCheck {
    fn id(&self) -> &str {
        "NAM002"
    }

    fn name(&self) -> &str {
        "Duplicate target name"
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
        let mut issues = Vec::new();
        // Case-folded so the check holds on case-insensitive filesystems
        let mut first_use: HashMap<String, usize> = HashMap::new();

        for entry in &plan.entries {
            // Empty names are reported by NAM001
            if entry.target_stem().is_empty() {
                continue;
            }
            let key = entry.target_name().to_lowercase();
            match first_use.get(&key) {
                Some(first_row) => issues.push(Issue::new(
                    self.id(),
                    IssueScope::Row(entry.row),
                    format!(
                        "Target '{}' is already used by row {}",
                        entry.target_name(),
                        first_row + 1
                    ),
                    self.severity(),
                )),
                None => {
                    first_use.insert(key, entry.row);
                }
            }
        }

        Ok(issues)
    }
}
