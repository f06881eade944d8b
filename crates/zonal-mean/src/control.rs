//! Control-file parsing.
//!
//! A control file holds one `NAME = VALUE` entry per line. Everything after
//! `#` is a comment, names are case-insensitive and lines that do not match
//! the pattern are ignored. Command-line overrides replace file entries.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ZonalMeanError};

/// Path value meaning "no control file".
pub const NO_FILE: &str = "-";

/// Parsed control parameters.
#[derive(Debug, Clone, Default)]
pub struct ControlFile {
    entries: HashMap<String, String>,
}

impl ControlFile {
    /// Parse control-file text.
    pub fn parse(text: &str) -> Self {
        let mut control = Self::default();

        for line in text.lines() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            if let Some((name, value)) = split_entry(line) {
                control.set(name, value);
            }
        }

        control
    }

    /// Read and parse a control file. `-` yields an empty control set.
    pub fn load(path: &Path) -> Result<Self> {
        if path.as_os_str() == NO_FILE {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ZonalMeanError::ControlFile {
            path: path.to_path_buf(),
            source,
        })?;
        let control = Self::parse(&text);
        debug!(file = %path.display(), entries = control.len(), "Read control file");
        Ok(control)
    }

    /// Apply a `NAME=VALUE` override.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = split_entry(assignment).ok_or_else(|| {
            ZonalMeanError::config(format!("expected NAME=VALUE, got '{}'", assignment))
        })?;
        self.set(name, value);
        Ok(())
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&mut self, name: &str, value: &str) {
        self.entries
            .insert(name.to_ascii_uppercase(), value.to_string());
    }

    /// Raw value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// String parameter with a default.
    pub fn get_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Floating-point parameter with a default.
    ///
    /// `nan` and `inf` are rejected.
    pub fn get_f64(&self, name: &str, default: f64) -> Result<f64> {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        match value.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(x),
            _ => Err(ZonalMeanError::config(format!(
                "{} = '{}' is not a finite number",
                name, value
            ))),
        }
    }

    /// Non-negative integer parameter with a default.
    pub fn get_usize(&self, name: &str, default: usize) -> Result<usize> {
        match self.get(name) {
            Some(value) => value.parse().map_err(|_| {
                ZonalMeanError::config(format!(
                    "{} = '{}' is not a non-negative integer",
                    name, value
                ))
            }),
            None => Ok(default),
        }
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `NAME = VALUE` into its parts. The value is the first token after
/// the separator.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once('=')?;
    let name = name.trim();
    let value = value.split_whitespace().next()?;
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name, value))
}
