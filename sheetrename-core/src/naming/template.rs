//! Naming templates: literal text interleaved with column references

use super::{RenderedName, finish_name, is_valid_filename_char, sanitize_component};
use crate::error::{Error, Result};
use crate::reader::{SpreadsheetRow, Table};
use std::fmt;

/// One piece of a naming template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Column(String),
}

/// Ordered tokens rendered into a target file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTemplate {
    tokens: Vec<Token>,
    max_length: Option<usize>,
}

impl NamingTemplate {
    /// Build a template from tokens, validating literal text
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());

        for token in tokens {
            match token {
                Token::Literal(text) if text.is_empty() => {}
                Token::Literal(text) => {
                    if let Some(c) = text.chars().find(|c| !is_valid_filename_char(*c)) {
                        return Err(Error::InvalidTemplate(format!(
                            "character {:?} is not allowed in a file name",
                            c
                        )));
                    }
                    match merged.last_mut() {
                        Some(Token::Literal(prev)) => prev.push_str(&text),
                        _ => merged.push(Token::Literal(text)),
                    }
                }
                Token::Column(name) => {
                    if name.trim().is_empty() {
                        return Err(Error::InvalidTemplate(
                            "empty column reference".to_string(),
                        ));
                    }
                    merged.push(Token::Column(name));
                }
            }
        }

        strip_pdf_extension(&mut merged);

        if merged.is_empty() {
            return Err(Error::InvalidTemplate("template is empty".to_string()));
        }

        Ok(Self {
            tokens: merged,
            max_length: None,
        })
    }

    /// Parse `{Column}` references and literal text
    ///
    /// `{{` and `}}` stand for literal braces. A trailing `.pdf` is dropped,
    /// since each file keeps its own extension.
    pub fn parse(source: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(Error::InvalidTemplate(format!(
                                    "unclosed column reference in '{}'",
                                    source
                                )));
                            }
                            Some(ch) => name.push(ch),
                        }
                    }
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(Token::Column(name));
                }
                '}' => {
                    return Err(Error::InvalidTemplate(format!(
                        "unmatched '}}' in '{}'",
                        source
                    )));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Self::from_tokens(tokens)
    }

    /// Columns joined by separators: `c1 s1 c2 s2 … cN`
    ///
    /// Separators beyond N-1 are ignored; missing ones are empty.
    pub fn interleave<C, S>(columns: &[C], separators: &[S]) -> Result<Self>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let mut tokens = Vec::with_capacity(columns.len() * 2);
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                if let Some(sep) = separators.get(i - 1) {
                    tokens.push(Token::Literal(sep.as_ref().to_string()));
                }
            }
            tokens.push(Token::Column(column.as_ref().to_string()));
        }
        Self::from_tokens(tokens)
    }

    /// Same separator between every pair of columns
    pub fn joined<C: AsRef<str>>(columns: &[C], separator: &str) -> Result<Self> {
        let separators = vec![separator; columns.len().saturating_sub(1)];
        Self::interleave(columns, separators.as_slice())
    }

    /// Cut rendered names to at most `max` characters
    pub fn with_max_length(mut self, max: Option<usize>) -> Self {
        self.max_length = max;
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Referenced columns, first occurrence order, without repeats
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for token in &self.tokens {
            if let Token::Column(name) = token {
                if !columns.contains(&name.as_str()) {
                    columns.push(name);
                }
            }
        }
        columns
    }

    /// Fail if the template references columns the table lacks
    pub fn validate_against(&self, table: &Table) -> Result<()> {
        let missing = table.missing_columns(self.columns().as_slice());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::UnknownColumns(missing))
        }
    }

    /// Render a name for one row
    pub fn render(&self, row: &SpreadsheetRow<'_>) -> RenderedName {
        let mut name = String::new();
        let mut empty_columns: Vec<String> = Vec::new();

        for token in &self.tokens {
            match token {
                Token::Literal(text) => name.push_str(text),
                Token::Column(column) => {
                    let value = row
                        .get(column)
                        .map(|v| sanitize_component(&v.to_string()))
                        .unwrap_or_default();
                    if value.is_empty() && !empty_columns.contains(column) {
                        empty_columns.push(column.clone());
                    }
                    name.push_str(&value);
                }
            }
        }

        let (name, truncated) = finish_name(&name, self.max_length);
        RenderedName {
            name,
            empty_columns,
            truncated,
        }
    }
}

impl fmt::Display for NamingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Literal(text) => write!(f, "{}", text.replace('{', "{{").replace('}', "}}"))?,
                Token::Column(name) => write!(f, "{{{}}}", name)?,
            }
        }
        Ok(())
    }
}

fn strip_pdf_extension(tokens: &mut Vec<Token>) {
    if let Some(Token::Literal(text)) = tokens.last_mut() {
        let cut = text.len().saturating_sub(4);
        if text.len() >= 4 && text.get(cut..).is_some_and(|tail| tail.eq_ignore_ascii_case(".pdf")) {
            text.truncate(cut);
            if text.is_empty() {
                tokens.pop();
            }
        }
    }
}
