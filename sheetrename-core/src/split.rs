//! PDF splitting into consecutive page ranges

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use lopdf::Document;
use serde::Serialize;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where and how to write the parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub pages_per_part: usize,
    /// Output directory; `<source dir>/<directory_name>` when unset
    pub output_dir: Option<PathBuf>,
    /// Name of the directory created next to the source
    pub directory_name: String,
}

impl SplitOptions {
    pub fn new(pages_per_part: usize) -> Self {
        Self {
            pages_per_part,
            output_dir: None,
            directory_name: SplitConfig::default().directory,
        }
    }

    pub fn from_config(config: &SplitConfig) -> Self {
        Self {
            pages_per_part: config.pages_per_part,
            output_dir: None,
            directory_name: config.directory.clone(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Directory the parts of `input` are written to
    pub fn output_dir(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(&self.directory_name),
        }
    }
}

/// One written part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitPart {
    /// 1-based part number
    pub index: usize,
    pub path: PathBuf,
    /// 1-based, inclusive page numbers of the source
    pub first_page: usize,
    pub last_page: usize,
}

impl SplitPart {
    pub fn page_count(&self) -> usize {
        self.last_page + 1 - self.first_page
    }
}

/// Outcome of a split
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub total_pages: usize,
    pub parts: Vec<SplitPart>,
}

/// 0-based page ranges of at most `pages_per_part` pages covering `total`
pub fn page_ranges(total: usize, pages_per_part: usize) -> Vec<Range<usize>> {
    if pages_per_part == 0 {
        return Vec::new();
    }
    (0..total)
        .step_by(pages_per_part)
        .map(|start| start..(start + pages_per_part).min(total))
        .collect()
}

/// Planned parts without touching the disk
pub fn plan_split(input: &Path, total_pages: usize, options: &SplitOptions) -> Vec<SplitPart> {
    let output_dir = options.output_dir(input);
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "part".to_string());

    page_ranges(total_pages, options.pages_per_part)
        .into_iter()
        .enumerate()
        .map(|(i, range)| SplitPart {
            index: i + 1,
            path: output_dir.join(format!("{}_{}.pdf", stem, i + 1)),
            first_page: range.start + 1,
            last_page: range.end,
        })
        .collect()
}

/// Count the pages of a PDF
pub fn page_count<P: AsRef<Path>>(input: P) -> Result<usize> {
    let input = input.as_ref();
    Ok(load(input)?.get_pages().len())
}

/// Split `input` into parts of `pages_per_part` pages
///
/// Every part path is checked before the first one is written, so an
/// existing file stops the split without leaving partial output.
pub fn split_pdf<P: AsRef<Path>>(input: P, options: &SplitOptions) -> Result<SplitReport> {
    let input = input.as_ref();
    if options.pages_per_part == 0 {
        return Err(Error::InvalidArgument(
            "pages per part must be at least 1".to_string(),
        ));
    }

    let document = load(input)?;
    let total_pages = document.get_pages().len();
    debug!(source = %input.display(), pages = total_pages, "PDF loaded");

    let parts = plan_split(input, total_pages, options);
    if let Some(existing) = parts.iter().find(|p| p.path.exists()) {
        return Err(Error::Collision(existing.path.clone()));
    }

    let output_dir = options.output_dir(input);
    fs::create_dir_all(&output_dir).map_err(|e| Error::io(&output_dir, e))?;

    for part in &parts {
        let mut chunk = document.clone();
        // lopdf numbers pages from 1
        let drop: Vec<u32> = (1..=total_pages as u32)
            .filter(|&n| (n as usize) < part.first_page || (n as usize) > part.last_page)
            .collect();
        if !drop.is_empty() {
            chunk.delete_pages(&drop);
            chunk.prune_objects();
        }
        chunk
            .save(&part.path)
            .map_err(|e| Error::io(&part.path, e))?;
        info!(
            part = part.index,
            pages = %format!("{}-{}", part.first_page, part.last_page),
            path = %part.path.display(),
            "part written"
        );
    }

    Ok(SplitReport {
        source: input.to_path_buf(),
        total_pages,
        parts,
    })
}

fn load(input: &Path) -> Result<Document> {
    if !input.exists() {
        return Err(Error::NotFound(input.to_path_buf()));
    }
    Document::load(input).map_err(|source| match source {
        lopdf::Error::IO(e) => Error::io(input, e),
        source => Error::Pdf {
            path: input.to_path_buf(),
            source,
        },
    })
}
