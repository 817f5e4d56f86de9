//! CLI command implementations

use crate::input::{resolve_inputs, FileReader, InputText};
use anyhow::Result;
use clap::Subcommand;

pub mod generate_config;
pub mod split;
pub mod translate;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text into translation chunks (or delivery units) without translating
    Split(split::SplitArgs),

    /// Translate text chunk by chunk and print the delivery units
    Translate(translate::TranslateArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::Translate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
///
/// Library crates log through `tracing`, whose `log` feature forwards
/// events to the logger installed here.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A logger may already be installed when commands run in-process
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Load `--text` or the inputs matched by `patterns`
pub fn load_inputs(patterns: &[String], text: Option<&str>) -> Result<Vec<InputText>> {
    if let Some(text) = text {
        return Ok(vec![FileReader::literal(text)?]);
    }

    resolve_inputs(patterns)?
        .iter()
        .map(FileReader::load)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let validate = Commands::Validate(validate::ValidateArgs {
            config: PathBuf::from("tlumach.toml"),
        });

        let debug_str = format!("{:?}", validate);
        assert!(debug_str.contains("Validate"));
        assert!(debug_str.contains("tlumach.toml"));
    }

    #[test]
    fn test_literal_text_wins_over_patterns() {
        let inputs = load_inputs(&["/nonexistent/*.txt".to_string()], Some("Hello there")).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].text, "Hello there");
        assert!(load_inputs(&[], None).is_err());
    }
}
