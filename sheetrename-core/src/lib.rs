//! sheetrename-core: rename PDF batches from spreadsheet rows
//!
//! A folder of scanned documents is paired, in natural file-name order, with
//! the rows of a spreadsheet. Each file gets a name rendered from a template
//! over the row's columns. Pre-flight checks stop the batch before any file
//! is touched when counts differ or names would clash. A single PDF can also
//! be split into parts of a fixed page count.

pub mod checks;
pub mod config;
pub mod error;
pub mod files;
pub mod issue;
pub mod naming;
pub mod reader;
pub mod renamer;
pub mod split;

pub use config::RenamerConfig;
pub use error::{Error, Result};
pub use files::{FileEntry, FileSet, natural_cmp, scan_folder};
pub use issue::{Issue, IssueScope, Severity};
pub use naming::{NamingTemplate, RenderedName, Token, sanitize_component};
pub use reader::{CellValue, SpreadsheetRow, Table, read_table};
pub use renamer::{PlannedRename, RenamePlan, RenameReport, Renamer};
pub use split::{SplitOptions, SplitPart, SplitReport, page_ranges, split_pdf};
