//! Output formatters for rename plans and issues

use anyhow::Result;
use colored::*;
use sheetrename_core::{
    Issue, IssueScope, PlannedRename, RenamePlan, RenameReport, Severity, Table,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Print the column names of a spreadsheet
pub fn print_columns(spreadsheet: &Path, table: &Table) {
    println!("{}", format!("Columns in {}", spreadsheet.display()).bold());
    for (i, column) in table.columns().iter().enumerate() {
        println!("  {:>3}  {}", i + 1, column.cyan());
    }
    println!("{} {}", "Rows:".bold(), table.len());
}

pub fn print_columns_json(spreadsheet: &Path, table: &Table) -> Result<()> {
    let output = serde_json::json!({
        "spreadsheet": spreadsheet.display().to_string(),
        "columns": table.columns(),
        "rows": table.len(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Point a single-PDF folder at the split option
pub fn print_split_hint(file: &Path) {
    eprintln!(
        "{} {} is the only PDF in the folder; add {} to split it into parts of N pages and rename those",
        "hint:".cyan().bold(),
        file.display(),
        "--split-pages N".bold()
    );
}

/// List the files renamed before a failure stopped the batch
pub fn print_renamed(renamed: &[PlannedRename]) {
    eprintln!(
        "{}",
        format!("✗ Stopped after renaming {} files:", renamed.len())
            .red()
            .bold()
    );
    for entry in renamed {
        eprintln!("  {} → {}", entry.source_name(), entry.target_name());
    }
}

/// Print the plan, its issues grouped by scope, and what was renamed
pub fn print_human(plan: &RenamePlan, issues: &[Issue], report: Option<&RenameReport>) {
    println!("{}", format!("Renaming in: {}", plan.directory.display()).bold());
    println!("{} {}", "Template:".bold(), plan.template.cyan());
    println!(
        "{} {} files, {} rows",
        "Batch:".bold(),
        plan.file_count,
        plan.row_count
    );
    println!();

    for entry in &plan.entries {
        let arrow = if entry.is_unchanged() {
            "=".bright_black()
        } else {
            "→".green()
        };
        println!(
            "  {:>4}  {} {} {}",
            entry.row + 1,
            entry.source_name(),
            arrow,
            entry.target_name().bold()
        );
    }
    println!();

    print_issues(issues);

    match report {
        Some(report) => {
            println!(
                "{}",
                format!("✓ Renamed {} files", report.renamed.len())
                    .green()
                    .bold()
            );
            if !report.skipped.is_empty() {
                println!("  {} {}", "Already named:".bold(), report.skipped.len());
            }
        }
        None if issues.iter().any(Issue::is_blocking) => {
            println!("{}", "✗ Nothing renamed".red().bold());
        }
        None => println!("{}", "Dry run, nothing renamed".yellow()),
    }
}

/// Print issues grouped by batch, row and file
pub fn print_issues(issues: &[Issue]) {
    if issues.is_empty() {
        println!("{}", "✓ No issues found".green().bold());
        println!();
        return;
    }

    let mut batch_issues = Vec::new();
    let mut row_issues: BTreeMap<usize, Vec<&Issue>> = BTreeMap::new();
    let mut file_issues: BTreeMap<String, Vec<&Issue>> = BTreeMap::new();

    for issue in issues {
        match &issue.scope {
            IssueScope::Batch => batch_issues.push(issue),
            IssueScope::Row(index) => row_issues.entry(*index).or_default().push(issue),
            IssueScope::File(path) => file_issues
                .entry(path.display().to_string())
                .or_default()
                .push(issue),
        }
    }

    if !batch_issues.is_empty() {
        println!("{}", "Batch:".bold().underline());
        for issue in batch_issues {
            print_issue(issue, 1);
        }
        println!();
    }

    for (index, issues) in &row_issues {
        println!("{} {}", "Row:".bold(), (index + 1).to_string().yellow());
        for issue in issues {
            print_issue(issue, 1);
        }
    }
    if !row_issues.is_empty() {
        println!();
    }

    for (path, issues) in &file_issues {
        println!("{} {}", "File:".bold(), path.cyan());
        for issue in issues {
            print_issue(issue, 1);
        }
    }
    if !file_issues.is_empty() {
        println!();
    }

    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("{}", "Summary:".bold().underline());
    if count(Severity::Error) > 0 {
        println!("  {} {}", "Errors:".red().bold(), count(Severity::Error));
    }
    if count(Severity::Warning) > 0 {
        println!("  {} {}", "Warnings:".yellow().bold(), count(Severity::Warning));
    }
    if count(Severity::Info) > 0 {
        println!("  {} {}", "Info:".blue().bold(), count(Severity::Info));
    }
    println!();
}

fn print_issue(issue: &Issue, indent: usize) {
    let indent_str = "  ".repeat(indent);
    let severity_str = match issue.severity {
        Severity::Error => "ERROR".red().bold(),
        Severity::Warning => "WARN".yellow().bold(),
        Severity::Info => "INFO".blue().bold(),
    };

    println!(
        "{}{} [{}] {}",
        indent_str,
        severity_str,
        issue.check_id.bright_black(),
        issue.message
    );
}

/// Print the plan and issues in JSON format
pub fn print_json(plan: &RenamePlan, issues: &[Issue], report: Option<&RenameReport>) -> Result<()> {
    let output = serde_json::json!({
        "plan": plan,
        "issues": issues,
        "applied": report.is_some(),
        "renamed": report.map(|r| r.renamed.len()).unwrap_or(0),
        "skipped": report.map(|r| r.skipped.len()).unwrap_or(0),
        "summary": {
            "total": issues.len(),
            "errors": issues.iter().filter(|i| i.severity == Severity::Error).count(),
            "warnings": issues.iter().filter(|i| i.severity == Severity::Warning).count(),
            "info": issues.iter().filter(|i| i.severity == Severity::Info).count(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
