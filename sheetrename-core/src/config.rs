//! Configuration system for reading, naming, checks and splitting

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetrename.toml";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenamerConfig {
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub split: SplitConfig,
}

impl RenamerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check if a plan check is enabled
    pub fn is_check_enabled(&self, check_id: &str) -> bool {
        !self
            .checks
            .disabled
            .iter()
            .any(|selector| matches_check_selector(selector, check_id))
    }

    /// Validate the configuration against the known check ids
    ///
    /// `mandatory` lists the checks that guard against data loss; no selector
    /// may switch those off.
    pub fn validate(&self, valid_tokens: &HashSet<String>, mandatory: &[&str]) -> Result<()> {
        for selector in &self.checks.disabled {
            if !valid_tokens.contains(selector) {
                return Err(Error::Config(format!(
                    "unknown check or category '{}' in checks.disabled",
                    selector
                )));
            }
            if let Some(id) = mandatory
                .iter()
                .find(|id| matches_check_selector(selector, id))
            {
                return Err(Error::Config(format!(
                    "check {} cannot be disabled (matched by '{}')",
                    id, selector
                )));
            }
        }

        if self.split.pages_per_part == 0 {
            return Err(Error::Config(
                "split.pages_per_part must be at least 1".to_string(),
            ));
        }

        if self.files.allowed_extensions.is_empty() {
            return Err(Error::Config(
                "files.allowed_extensions must not be empty".to_string(),
            ));
        }

        if self.naming.max_name_length == Some(0) {
            return Err(Error::Config(
                "naming.max_name_length must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Spreadsheet reading options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Sheet to read (first sheet when unset)
    #[serde(default)]
    pub sheet: Option<String>,
    /// 0-based row holding the column names
    #[serde(default)]
    pub header_row: u32,
}

/// Filename formatting options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Maximum characters in a target name, extension excluded
    #[serde(default)]
    pub max_name_length: Option<usize>,
    /// Separator placed between columns when no template is given
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_name_length: None,
            separator: default_separator(),
        }
    }
}

fn default_separator() -> String {
    "_".to_string()
}

/// Folder scanning options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Extensions (without dot) accepted in the folder
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string()]
}

/// Plan check selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Check ids or id prefixes to skip
    #[serde(default)]
    pub disabled: HashSet<String>,
}

/// PDF splitting options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default = "default_pages_per_part")]
    pub pages_per_part: usize,
    /// Directory created next to the source PDF for the parts
    #[serde(default = "default_split_directory")]
    pub directory: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            pages_per_part: default_pages_per_part(),
            directory: default_split_directory(),
        }
    }
}

fn default_pages_per_part() -> usize {
    1
}

fn default_split_directory() -> String {
    "split".to_string()
}

fn matches_check_selector(selector: &str, check_id: &str) -> bool {
    check_id == selector || check_id.starts_with(selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> HashSet<String> {
        ["CNT", "CNT001", "CEL", "CEL001", "NAM", "NAM001", "NAM004"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_check_matching() {
        assert!(matches_check_selector("CEL", "CEL001"));
        assert!(matches_check_selector("CEL001", "CEL001"));
        assert!(!matches_check_selector("CEL", "NAM001"));
    }

    #[test]
    fn test_check_activation() {
        let mut config = RenamerConfig::default();
        assert!(config.is_check_enabled("CEL001"));

        config.checks.disabled.insert("CEL".to_string());
        assert!(!config.is_check_enabled("CEL001"));
        assert!(config.is_check_enabled("NAM004"));
    }

    #[test]
    fn test_validation() {
        let mandatory = ["CNT001", "NAM001"];
        let config = RenamerConfig::default();
        assert!(config.validate(&tokens(), &mandatory).is_ok());

        let mut bad = config.clone();
        bad.checks.disabled.insert("XYZ".to_string());
        assert!(bad.validate(&tokens(), &mandatory).is_err());

        // A prefix that covers a mandatory check is rejected too
        let mut bad = config.clone();
        bad.checks.disabled.insert("NAM".to_string());
        assert!(bad.validate(&tokens(), &mandatory).is_err());

        let mut ok = config.clone();
        ok.checks.disabled.insert("NAM004".to_string());
        assert!(ok.validate(&tokens(), &mandatory).is_ok());

        let mut bad = config.clone();
        bad.split.pages_per_part = 0;
        assert!(bad.validate(&tokens(), &mandatory).is_err());

        let mut bad = config;
        bad.files.allowed_extensions.clear();
        assert!(bad.validate(&tokens(), &mandatory).is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = RenamerConfig::from_toml(
            r#"
            [reader]
            sheet = "Records"
            header_row = 2

            [naming]
            max_name_length = 80

            [checks]
            disabled = ["CEL001"]

            [split]
            pages_per_part = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.reader.sheet.as_deref(), Some("Records"));
        assert_eq!(config.reader.header_row, 2);
        assert_eq!(config.naming.max_name_length, Some(80));
        assert_eq!(config.naming.separator, "_");
        assert_eq!(config.files.allowed_extensions, vec!["pdf"]);
        assert!(!config.is_check_enabled("CEL001"));
        assert_eq!(config.split.pages_per_part, 3);
        assert_eq!(config.split.directory, "split");
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            RenamerConfig::from_toml("[split]\npages_per_part = \"many\""),
            Err(Error::Config(_))
        ));
    }
}
