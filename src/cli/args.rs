//! CLI argument definitions using clap
//!
//! Commands:
//! - feedview map [--config <path>]
//! - feedview batch [--config <path>] [--input <path>]
//! - feedview serve [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// feedview - Activity Stream post view for document indexing
#[derive(Parser, Debug)]
#[command(name = "feedview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Map one JSON document read from stdin
    Map {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Map JSON-lines documents and write one row per line
    Batch {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON-lines input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Run the query server protocol on stdin/stdout
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch() {
        let cli = Cli::try_parse_from(["feedview", "batch", "--input", "docs.jsonl"]).unwrap();
        match cli.command {
            Command::Batch { config, input } => {
                assert!(config.is_none());
                assert_eq!(input, Some(PathBuf::from("docs.jsonl")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_config() {
        let cli = Cli::try_parse_from(["feedview", "serve", "--config", "fv.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve { config: Some(_) }
        ));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["feedview", "reduce"]).is_err());
    }
}
