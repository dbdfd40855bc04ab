//! Pre-flight checks run over a rename plan

pub mod registry;

// Check implementations
pub mod cel001_empty_cell_value;
pub mod cnt001_count_mismatch;
pub mod fs001_target_collision;
pub mod nam001_empty_target;
pub mod nam002_duplicate_target;
pub mod nam003_truncated_target;
pub mod nam004_unchanged_target;

use crate::error::Result;
use crate::issue::{Issue, Severity};
use crate::renamer::RenamePlan;

/// Trait that all plan checks must implement
pub trait PlanCheck: Send + Sync {
    /// Unique check identifier (e.g., "CNT001")
    fn id(&self) -> &str;

    /// Human-readable check name
    fn name(&self) -> &str;

    /// Check category
    fn category(&self) -> CheckCategory;

    /// Severity of the issues this check reports
    fn severity(&self) -> Severity;

    /// Mandatory checks cannot be disabled in configuration
    fn mandatory(&self) -> bool {
        false
    }

    /// Inspect the plan for issues
    fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>>;
}

/// Check categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCategory {
    Count,
    Naming,
    Filesystem,
    Cells,
}

impl CheckCategory {
    pub fn as_str(&self) -> &str {
        match self {
            CheckCategory::Count => "Count",
            CheckCategory::Naming => "Naming",
            CheckCategory::Filesystem => "Filesystem",
            CheckCategory::Cells => "Cells",
        }
    }

    /// Id prefix shared by the checks of this category
    pub fn prefix(&self) -> &str {
        match self {
            CheckCategory::Count => "CNT",
            CheckCategory::Naming => "NAM",
            CheckCategory::Filesystem => "FS",
            CheckCategory::Cells => "CEL",
        }
    }
}
