//! CLI module for slackline
//!
//! - `channels`, `im`, `oauth`: Web API calls with the configured credentials
//! - `parse`: run a payload through the Events API parser
//! - `serve`: Events API webhook server

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod parse;
mod slack;

/// Slack Web API and Events API client
#[derive(Parser, Debug)]
#[command(name = "slackline")]
#[command(about = "Slack Web API and Events API client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List channels visible to the bot token
    Channels {
        /// Leave archived channels out
        #[arg(long)]
        exclude_archived: bool,
    },
    /// Send a direct message to a user
    Im {
        /// User ID (e.g. U0123456)
        user: String,
        /// Message text
        text: String,
    },
    /// Exchange an OAuth redirect code for tokens
    Oauth {
        /// Code from the OAuth redirect
        code: String,
        /// Redirect URI used in the authorize step
        #[arg(long, default_value = "")]
        redirect_uri: String,
        /// Use `oauth.v2.access`
        #[arg(long)]
        v2: bool,
    },
    /// Parse an Events API payload and print the result as JSON
    Parse {
        /// Payload file (stdin if omitted)
        file: Option<PathBuf>,
        /// Skip verification token checks
        #[arg(long)]
        no_verify: bool,
    },
    /// Start the Events API webhook server
    Serve,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Channels { exclude_archived }) => slack::channels(exclude_archived).await,
        Some(Commands::Im { user, text }) => slack::im(&user, &text).await,
        Some(Commands::Oauth {
            code,
            redirect_uri,
            v2,
        }) => slack::oauth(&code, &redirect_uri, v2).await,
        Some(Commands::Parse { file, no_verify }) => parse::run(file.as_deref(), no_verify),
        Some(Commands::Serve) => crate::server::run().await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_oauth_flags() {
        let cli = Cli::parse_from(["slackline", "oauth", "abc", "--v2"]);
        match cli.command {
            Some(Commands::Oauth {
                code,
                redirect_uri,
                v2,
            }) => {
                assert_eq!(code, "abc");
                assert!(redirect_uri.is_empty());
                assert!(v2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_channels_flag() {
        let cli = Cli::parse_from(["slackline", "channels", "--exclude-archived"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Channels {
                exclude_archived: true
            })
        ));
    }
}
