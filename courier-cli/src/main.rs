//! Courier CLI
//!
//! Command-line interface for starting and following robot deliveries.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "courier")]
#[command(about = "Courier robot delivery CLI", long_about = None)]
struct Cli {
    /// Courier server URL
    #[arg(long, env = "COURIER_URL", default_value = "http://localhost:8001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config { server_url: cli.url };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use crate::commands::DeliveryCommands;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_start_defaults() {
        let cli = Cli::try_parse_from(["courier", "delivery", "start"]).unwrap();
        assert_eq!(cli.url, "http://localhost:8001");

        match cli.command {
            Commands::Delivery {
                command:
                    DeliveryCommands::Start {
                        interface,
                        description,
                        wait,
                        ..
                    },
            } => {
                assert_eq!(interface, "en7");
                assert!(description.is_none());
                assert!(!wait);
            }
            _ => panic!("expected delivery start"),
        }
    }

    #[test]
    fn test_status_requires_id() {
        assert!(Cli::try_parse_from(["courier", "delivery", "status"]).is_err());
        assert!(Cli::try_parse_from(["courier", "delivery", "status", "3"]).is_ok());
    }

    #[test]
    fn test_delivery_commands_are_grouped() {
        for args in [
            vec!["courier", "health"],
            vec!["courier", "delivery", "wait", "3", "--interval", "2"],
            vec!["courier", "delivery", "list"],
            vec!["courier", "delivery", "start", "--wait", "--interval", "1"],
        ] {
            assert!(Cli::try_parse_from(args.clone()).is_ok(), "{:?}", args);
        }

        for args in [
            vec!["courier", "start"],
            vec!["courier", "status", "3"],
            vec!["courier", "wait", "3"],
            vec!["courier", "list"],
        ] {
            assert!(Cli::try_parse_from(args.clone()).is_err(), "{:?}", args);
        }
    }
}
