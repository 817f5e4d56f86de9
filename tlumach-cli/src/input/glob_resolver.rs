//! Input pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Where an input comes from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum InputSource {
    /// Standard input, requested with `-`
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Name used in output and logs
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

/// Resolve input patterns to sources
///
/// `-` stands for standard input. Files matched by several patterns are
/// read once.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<InputSource>> {
    let mut sources = Vec::new();

    for pattern in patterns {
        if pattern == "-" {
            sources.push(InputSource::Stdin);
            continue;
        }

        let paths = glob(pattern)
            .map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                sources.push(InputSource::File(path));
            }
        }
    }

    if sources.is_empty() {
        return Err(CliError::NoInput("no files match the given patterns".to_string()).into());
    }

    // Remove duplicates and sort
    sources.sort();
    sources.dedup();

    Ok(sources)
}
