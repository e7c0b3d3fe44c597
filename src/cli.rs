//! Command-line interface for the `lb` binary

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Shared loading-indicator coordination demo
#[derive(Debug, Parser)]
#[command(name = "lb", version, about)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (default: .loadbus.yml, then
    /// ~/.config/loadbus/loadbus.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive demo: spawn loading operations and watch the
    /// shared overlay aggregate them
    Demo {
        /// Fetch this URL instead of simulating operations
        #[arg(long)]
        url: Option<String>,

        /// Number of concurrent operations to spawn
        #[arg(short = 'n', long, default_value_t = 4)]
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["lb"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_demo_defaults() {
        let cli = Cli::try_parse_from(["lb", "demo"]).unwrap();
        match cli.command {
            Some(Command::Demo { url, count }) => {
                assert!(url.is_none());
                assert_eq!(count, 4);
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_parse_demo_with_url_and_count() {
        let cli = Cli::try_parse_from(["lb", "demo", "--url", "http://localhost:3000/api/leads", "-n", "8"]).unwrap();
        match cli.command {
            Some(Command::Demo { url, count }) => {
                assert_eq!(url.as_deref(), Some("http://localhost:3000/api/leads"));
                assert_eq!(count, 8);
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["lb", "demo", "--verbose", "--config", "/tmp/lb.yml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/lb.yml")));
    }
}
