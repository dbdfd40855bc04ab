//! Issue reporting for rename plans

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Severity level of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Scope of an issue (whole batch, one spreadsheet row, or one file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueScope {
    /// Batch-level issue
    Batch,
    /// Data row, 0-based index into the table
    Row(usize),
    /// File on disk
    File(PathBuf),
}

impl PartialOrd for IssueScope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IssueScope {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (IssueScope::Batch, IssueScope::Batch) => Ordering::Equal,
            (IssueScope::Batch, _) => Ordering::Less,
            (_, IssueScope::Batch) => Ordering::Greater,
            (IssueScope::Row(a), IssueScope::Row(b)) => a.cmp(b),
            (IssueScope::Row(_), IssueScope::File(_)) => Ordering::Less,
            (IssueScope::File(_), IssueScope::Row(_)) => Ordering::Greater,
            (IssueScope::File(a), IssueScope::File(b)) => a.cmp(b),
        }
    }
}

impl std::fmt::Display for IssueScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueScope::Batch => write!(f, "batch"),
            // Rows are shown 1-based, as a user counts them
            IssueScope::Row(index) => write!(f, "row {}", index + 1),
            IssueScope::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A finding produced by a plan check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Check ID (e.g., "CNT001")
    pub check_id: String,
    /// Scope of the issue
    pub scope: IssueScope,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: Severity,
}

impl Issue {
    pub fn new(
        check_id: impl Into<String>,
        scope: IssueScope,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            scope,
            message: message.into(),
            severity,
        }
    }

    /// Whether this issue prevents the rename from running
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scope
            .cmp(&other.scope)
            .then_with(|| self.check_id.cmp(&other.check_id))
    }
}
