//! Filename formatting from spreadsheet rows

mod template;

pub use template::{NamingTemplate, Token};

use regex::Regex;
use std::sync::LazyLock;

/// Characters that no common filesystem accepts in a file name
pub const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Result of rendering a template for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedName {
    /// Target name without extension
    pub name: String,
    /// Referenced columns whose value was empty for this row
    pub empty_columns: Vec<String>,
    /// Whether the name was cut to the configured maximum length
    pub truncated: bool,
}

/// Check whether a character may appear in a file name
pub fn is_valid_filename_char(c: char) -> bool {
    !c.is_control() && !INVALID_FILENAME_CHARS.contains(&c)
}

/// Make a cell value safe to embed in a file name
///
/// Line breaks and tabs become spaces, whitespace runs collapse to one
/// space, forbidden characters become `_`.
pub fn sanitize_component(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                ' '
            } else if is_valid_filename_char(c) {
                c
            } else {
                '_'
            }
        })
        .collect();

    WHITESPACE_RUN
        .replace_all(replaced.trim(), " ")
        .into_owned()
}

/// Final cleanup of an assembled name
///
/// Windows drops trailing dots and spaces silently, so they are removed here.
pub(crate) fn finish_name(name: &str, max_length: Option<usize>) -> (String, bool) {
    let mut result = name.trim_start().trim_end_matches(['.', ' ']).to_string();
    let mut truncated = false;

    if let Some(max) = max_length {
        if result.chars().count() > max {
            result = result.chars().take(max).collect();
            result = result.trim_end_matches(['.', ' ']).to_string();
            truncated = true;
        }
    }

    (result, truncated)
}
