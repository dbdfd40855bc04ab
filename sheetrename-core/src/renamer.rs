//! Batch renaming: pair files with rows, check the plan, rename

use crate::checks::{PlanCheck, registry};
use crate::config::RenamerConfig;
use crate::error::{Error, Result};
use crate::files::{self, FileEntry, FileSet};
use crate::issue::Issue;
use crate::naming::NamingTemplate;
use crate::reader::{self, Table};
use crate::split::{self, SplitOptions};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Source → target pairs computed before anything is renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    /// Template the targets were rendered from
    pub template: String,
    pub entries: Vec<PlannedRename>,
    pub file_count: usize,
    pub row_count: usize,
}

impl RenamePlan {
    /// Entries whose file name actually changes
    pub fn changes(&self) -> impl Iterator<Item = &PlannedRename> {
        self.entries.iter().filter(|e| !e.is_unchanged())
    }
}

/// One file paired with one spreadsheet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRename {
    /// 0-based data row index
    pub row: usize,
    pub source: PathBuf,
    pub target: PathBuf,
    /// Rendered name without extension
    pub stem: String,
    pub empty_columns: Vec<String>,
    pub truncated: bool,
}

impl PlannedRename {
    pub fn source_name(&self) -> String {
        file_name(&self.source)
    }

    pub fn target_name(&self) -> String {
        file_name(&self.target)
    }

    pub fn target_stem(&self) -> &str {
        &self.stem
    }

    pub fn is_unchanged(&self) -> bool {
        self.source == self.target
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Outcome of an applied plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenameReport {
    pub renamed: Vec<PlannedRename>,
    /// Entries that already had their target name
    pub skipped: Vec<PlannedRename>,
    /// Non-blocking issues found before renaming
    pub issues: Vec<Issue>,
}

/// Main renamer interface
pub struct Renamer {
    config: RenamerConfig,
    checks: Vec<Box<dyn PlanCheck>>,
}

impl Renamer {
    /// Create a new renamer with default configuration
    pub fn new() -> Self {
        Self::with_config(RenamerConfig::default())
    }

    /// Create a new renamer with custom configuration
    pub fn with_config(config: RenamerConfig) -> Self {
        let checks = registry::create_enabled_checks(&config);
        Self { config, checks }
    }

    pub fn config(&self) -> &RenamerConfig {
        &self.config
    }

    /// Read the spreadsheet, keeping only `columns` when any are given
    pub fn load_table<P: AsRef<Path>, S: AsRef<str>>(
        &self,
        spreadsheet: P,
        columns: &[S],
    ) -> Result<Table> {
        let table = reader::read_table(spreadsheet, &self.config.reader)?;
        if columns.is_empty() {
            Ok(table)
        } else {
            table.select(columns)
        }
    }

    /// List the folder's files in natural order
    pub fn scan<P: AsRef<Path>>(&self, folder: P) -> Result<FileSet> {
        files::scan_folder(folder, &self.config.files.allowed_extensions)
    }

    /// Parse `template`, or join `columns` with the configured separator
    pub fn template<S: AsRef<str>>(
        &self,
        template: Option<&str>,
        columns: &[S],
    ) -> Result<NamingTemplate> {
        let template = match template {
            Some(source) => NamingTemplate::parse(source)?,
            None if columns.is_empty() => {
                return Err(Error::InvalidTemplate(
                    "give a template or at least one column".to_string(),
                ));
            }
            None => NamingTemplate::joined(columns, &self.config.naming.separator)?,
        };
        Ok(template.with_max_length(self.config.naming.max_name_length))
    }

    /// Split the only PDF of `files` and return its parts as the new file set
    ///
    /// Parts go where [`SplitOptions::from_config`] puts them, in page order,
    /// so row N names the part holding the Nth page range.
    pub fn split_single(&self, files: &FileSet, pages_per_part: usize) -> Result<FileSet> {
        let (source, options) = self.single_pdf(files, pages_per_part)?;
        let report = split::split_pdf(source, &options)?;
        info!(
            source = %source.display(),
            parts = report.parts.len(),
            "split before renaming"
        );
        Ok(part_set(&options.output_dir(source), report.parts))
    }

    /// Like [`Renamer::split_single`] but without writing the parts
    pub fn preview_split(&self, files: &FileSet, pages_per_part: usize) -> Result<FileSet> {
        let (source, options) = self.single_pdf(files, pages_per_part)?;
        let total = split::page_count(source)?;
        let parts = split::plan_split(source, total, &options);
        Ok(part_set(&options.output_dir(source), parts))
    }

    fn single_pdf<'a>(
        &self,
        files: &'a FileSet,
        pages_per_part: usize,
    ) -> Result<(&'a Path, SplitOptions)> {
        if pages_per_part == 0 {
            return Err(Error::InvalidArgument(
                "pages per part must be at least 1".to_string(),
            ));
        }
        match files.entries.as_slice() {
            [entry] if files.extension == "pdf" => {
                let mut options = SplitOptions::from_config(&self.config.split);
                options.pages_per_part = pages_per_part;
                Ok((entry.path.as_path(), options))
            }
            _ => Err(Error::InvalidArgument(format!(
                "splitting needs a folder with exactly one PDF, found {} .{} file(s)",
                files.len(),
                files.extension
            ))),
        }
    }

    /// Pair files with rows index-by-index and render every target name
    ///
    /// A count mismatch does not fail here; it is reported by the plan checks
    /// so the user sees every problem at once.
    pub fn plan(
        &self,
        files: &FileSet,
        table: &Table,
        template: &NamingTemplate,
    ) -> Result<RenamePlan> {
        template.validate_against(table)?;

        let entries = files
            .entries
            .iter()
            .zip(table.rows())
            .map(|(file, row)| {
                let rendered = template.render(&row);
                let target_name = match file.extension() {
                    Some(ext) => format!("{}.{}", rendered.name, ext),
                    None => rendered.name.clone(),
                };
                let target = file
                    .path
                    .parent()
                    .unwrap_or(files.directory.as_path())
                    .join(target_name);
                PlannedRename {
                    row: row.index(),
                    source: file.path.clone(),
                    target,
                    stem: rendered.name,
                    empty_columns: rendered.empty_columns,
                    truncated: rendered.truncated,
                }
            })
            .collect();

        let plan = RenamePlan {
            directory: files.directory.clone(),
            template: template.to_string(),
            entries,
            file_count: files.len(),
            row_count: table.len(),
        };
        debug!(
            files = plan.file_count,
            rows = plan.row_count,
            template = %plan.template,
            "rename plan built"
        );
        Ok(plan)
    }

    /// Run the enabled checks over a plan
    pub fn check(&self, plan: &RenamePlan) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        for check in &self.checks {
            issues.extend(check.check(plan)?);
        }
        issues.sort();
        Ok(issues)
    }

    /// Rename every planned file
    ///
    /// Nothing is renamed when any check reports an error. A failure midway
    /// leaves the earlier renames in place and returns
    /// [`Error::Interrupted`] listing them.
    pub fn apply(&self, plan: &RenamePlan) -> Result<RenameReport> {
        let issues = self.check(plan)?;
        let (blocking, issues): (Vec<Issue>, Vec<Issue>) =
            issues.into_iter().partition(Issue::is_blocking);
        if !blocking.is_empty() {
            return Err(Error::Validation(blocking));
        }

        let mut report = RenameReport {
            issues,
            ..Default::default()
        };

        for entry in &plan.entries {
            if entry.is_unchanged() {
                warn!(file = %entry.source.display(), "already named, skipped");
                report.skipped.push(entry.clone());
                continue;
            }

            if let Err(e) = rename_entry(entry) {
                return Err(if report.renamed.is_empty() {
                    e
                } else {
                    Error::Interrupted {
                        renamed: report.renamed,
                        source: Box::new(e),
                    }
                });
            }
            info!(
                from = %entry.source.display(),
                to = %entry.target.display(),
                "renamed"
            );
            report.renamed.push(entry.clone());
        }

        Ok(report)
    }

    /// Scan, read, plan and apply in one call
    pub fn run<P, Q, S>(
        &self,
        folder: P,
        spreadsheet: Q,
        columns: &[S],
        template: &NamingTemplate,
    ) -> Result<RenameReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        S: AsRef<str>,
    {
        let files = self.scan(folder)?;
        let table = self.load_table(spreadsheet, columns)?;
        let plan = self.plan(&files, &table, template)?;
        self.apply(&plan)
    }
}

fn part_set(directory: &Path, parts: Vec<split::SplitPart>) -> FileSet {
    FileSet {
        directory: directory.to_path_buf(),
        entries: parts.into_iter().map(|p| FileEntry::new(p.path)).collect(),
        extension: "pdf".to_string(),
    }
}

fn rename_entry(entry: &PlannedRename) -> Result<()> {
    // The folder may have changed since the plan was checked
    let case_only = entry.source_name().to_lowercase() == entry.target_name().to_lowercase();
    if !case_only && entry.target.exists() {
        return Err(Error::Collision(entry.target.clone()));
    }
    fs::rename(&entry.source, &entry.target).map_err(|e| Error::io(&entry.source, e))
}

impl Default for Renamer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueScope;
    use crate::reader::CellValue;

    fn files_in(dir: &Path, names: &[&str]) -> FileSet {
        let mut entries: Vec<FileEntry> = names
            .iter()
            .map(|n| {
                let path = dir.join(n);
                fs::write(&path, n.as_bytes()).unwrap();
                FileEntry::new(path)
            })
            .collect();
        files::sort_naturally(&mut entries);
        FileSet {
            directory: dir.to_path_buf(),
            entries,
            extension: "pdf".to_string(),
        }
    }

    fn names(values: &[&str]) -> Table {
        Table::new(
            vec!["Name".to_string()],
            values
                .iter()
                .map(|v| vec![CellValue::Text(v.to_string())])
                .collect(),
        )
    }

    #[test]
    fn test_plan_pairs_in_natural_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["scan10.pdf", "scan2.pdf", "scan1.pdf"]);
        let table = names(&["first", "second", "third"]);
        let renamer = Renamer::new();
        let template = renamer.template(Some("{Name}"), &[] as &[&str]).unwrap();

        let plan = renamer.plan(&files, &table, &template).unwrap();
        let pairs: Vec<(String, String)> = plan
            .entries
            .iter()
            .map(|e| (e.source_name(), e.target_name()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("scan1.pdf".to_string(), "first.pdf".to_string()),
                ("scan2.pdf".to_string(), "second.pdf".to_string()),
                ("scan10.pdf".to_string(), "third.pdf".to_string()),
            ]
        );
    }

    #[test]
    fn test_plan_keeps_source_extension() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["a.PDF"]);
        let renamer = Renamer::new();
        let template = NamingTemplate::parse("{Name}.pdf").unwrap();
        let plan = renamer.plan(&files, &names(&["x"]), &template).unwrap();
        assert_eq!(plan.entries[0].target_name(), "x.PDF");
    }

    #[test]
    fn test_plan_rejects_unknown_column() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["a.pdf"]);
        let template = NamingTemplate::parse("{Missing}").unwrap();
        let result = Renamer::new().plan(&files, &names(&["x"]), &template);
        assert!(matches!(result, Err(Error::UnknownColumns(_))));
    }

    #[test]
    fn test_apply_refuses_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["a.pdf", "b.pdf", "c.pdf"]);
        let renamer = Renamer::new();
        let template = NamingTemplate::parse("{Name}").unwrap();
        let plan = renamer.plan(&files, &names(&["x", "y"]), &template).unwrap();

        match renamer.apply(&plan) {
            Err(Error::Validation(issues)) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].check_id, "CNT001");
                assert_eq!(issues[0].scope, IssueScope::Batch);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            assert!(dir.path().join(name).exists());
        }
        assert!(!dir.path().join("x.pdf").exists());
    }

    #[test]
    fn test_apply_renames_and_skips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["1.pdf", "2.pdf"]);
        let renamer = Renamer::new();
        let template = NamingTemplate::parse("{Name}").unwrap();
        let plan = renamer.plan(&files, &names(&["1", "Beta"]), &template).unwrap();

        let report = renamer.apply(&plan).unwrap();
        assert_eq!(report.renamed.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.issues.iter().any(|i| i.check_id == "NAM004"));
        assert!(dir.path().join("1.pdf").exists());
        assert!(dir.path().join("Beta.pdf").exists());
        assert!(!dir.path().join("2.pdf").exists());
    }

    #[test]
    fn test_apply_reports_renames_done_before_failure() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["1.pdf", "2.pdf", "3.pdf"]);
        let renamer = Renamer::new();
        let template = NamingTemplate::parse("{Name}").unwrap();
        let plan = renamer
            .plan(&files, &names(&["one", "two", "three"]), &template)
            .unwrap();
        fs::remove_file(dir.path().join("2.pdf")).unwrap();

        match renamer.apply(&plan) {
            Err(Error::Interrupted { renamed, source }) => {
                assert_eq!(renamed.len(), 1);
                assert_eq!(renamed[0].target_name(), "one.pdf");
                assert!(matches!(*source, Error::Io { .. }));
            }
            other => panic!("expected interrupted rename, got {other:?}"),
        }
        assert!(dir.path().join("one.pdf").exists());
        assert!(dir.path().join("3.pdf").exists());
    }

    #[test]
    fn test_apply_failure_on_first_file_is_not_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["1.pdf"]);
        let renamer = Renamer::new();
        let template = NamingTemplate::parse("{Name}").unwrap();
        let plan = renamer.plan(&files, &names(&["one"]), &template).unwrap();
        fs::remove_file(dir.path().join("1.pdf")).unwrap();

        assert!(matches!(renamer.apply(&plan), Err(Error::Io { .. })));
    }

    #[test]
    fn test_disabled_check_is_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let files = files_in(dir.path(), &["1.pdf"]);
        let mut config = RenamerConfig::default();
        config.checks.disabled.insert("NAM004".to_string());
        let renamer = Renamer::with_config(config);
        let template = NamingTemplate::parse("{Name}").unwrap();
        let plan = renamer.plan(&files, &names(&["1"]), &template).unwrap();
        assert!(renamer.check(&plan).unwrap().is_empty());
    }

    #[test]
    fn test_template_from_columns_uses_separator() {
        let mut config = RenamerConfig::default();
        config.naming.separator = " - ".to_string();
        let renamer = Renamer::with_config(config);
        let template = renamer.template(None, &["A", "B"]).unwrap();
        assert_eq!(template.to_string(), "{A} - {B}");
        assert!(renamer.template(None, &[] as &[&str]).is_err());
    }
}
