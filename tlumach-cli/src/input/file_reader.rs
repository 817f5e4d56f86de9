//! File reading utilities

use crate::error::CliError;
use crate::input::InputSource;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// A loaded input with the name used in output and logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText {
    /// File path, `<stdin>` or `<text>`
    pub name: String,
    /// Full content
    pub text: String,
}

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read all of standard input as UTF-8 text
    pub fn read_stdin() -> Result<String> {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        Ok(content)
    }

    /// Load one resolved input
    pub fn load(source: &InputSource) -> Result<InputText> {
        let text = match source {
            InputSource::Stdin => Self::read_stdin()?,
            InputSource::File(path) => Self::read_text(path)?,
        };
        Ok(InputText {
            name: source.name(),
            text,
        })
    }

    /// Wrap literal text given on the command line
    pub fn literal(text: &str) -> Result<InputText> {
        if text.trim().is_empty() {
            return Err(CliError::NoInput("--text is blank".to_string()).into());
        }
        Ok(InputText {
            name: "<text>".to_string(),
            text: text.to_string(),
        })
    }
}
