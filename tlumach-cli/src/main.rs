//! tlumach command-line entry point

use anyhow::Result;
use clap::Parser;
use tlumach_cli::commands::Commands;

/// Split and translate long messages chunk by chunk
#[derive(Debug, Parser)]
#[command(name = "tlumach", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_split_command() {
        let cli = Cli::try_parse_from(["tlumach", "split", "-t", "Hello.", "--chunk-limit", "50"])
            .unwrap();
        match cli.command {
            Commands::Split(args) => {
                assert_eq!(args.text.as_deref(), Some("Hello."));
                assert_eq!(args.chunk_limit, Some(50));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_input_or_text_is_required() {
        assert!(Cli::try_parse_from(["tlumach", "translate"]).is_err());
    }
}
