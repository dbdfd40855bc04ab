//! FS001: Target collides with an existing file

use super::{CheckCategory, PlanCheck};
use crate::error::{Error, Result};
use crate::issue::{Issue, IssueScope, Severity};
use crate::renamer::RenamePlan;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct TargetCollisionCheck;

impl PlanCheck for TargetCollisionCheck {
    fn id(&self) -> &str {
        "FS001"
    }

    fn name(&self) -> &str {
        "Target collides with a file"
    }

    fn category(&self) -> CheckCategory {
        CheckCategory::Filesystem
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn mandatory(&self) -> bool {
        true
    }

    fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut listings: HashMap<PathBuf, HashSet<String>> = HashMap::new();

        for entry in &plan.entries {
            let target_name = entry.target_name().to_lowercase();
            // A case-only change of the file's own name is not a collision
            if entry.source_name().to_lowercase() == target_name {
                continue;
            }

            let folder = entry
                .target
                .parent()
                .unwrap_or(plan.directory.as_path())
                .to_path_buf();
            let names = match listings.entry(folder) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => {
                    let names = folded_names(slot.key())?;
                    slot.insert(names)
                }
            };

            // Also catches targets that name another file of the batch;
            // renames are not reordered to free such names first
            if names.contains(&target_name) {
                issues.push(Issue::new(
                    self.id(),
                    IssueScope::File(entry.target.clone()),
                    format!(
                        "Renaming {} would overwrite an existing file",
                        entry.source_name()
                    ),
                    self.severity(),
                ));
            }
        }

        Ok(issues)
    }
}

/// Lowercased names of the entries of `folder`; empty when it does not exist
fn folded_names(folder: &Path) -> Result<HashSet<String>> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => return Err(Error::io(folder, e)),
    };

    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(folder, e))?;
        names.insert(entry.file_name().to_string_lossy().to_lowercase());
    }
    Ok(names)
}
