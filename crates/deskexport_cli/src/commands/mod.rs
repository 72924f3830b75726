pub mod config;
pub mod test;
pub mod tickets;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};

use crate::app::AppContext;
use crate::config::PartialCredentials;

pub use self::config::ConfigCommand;
pub use test::TestCommand;
pub use tickets::TicketsCommand;

#[async_trait]
pub trait CliCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()>;
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "deskexport",
    version,
    about = "Export Zendesk tickets to Markdown",
    after_help = "Credentials are read from --subdomain/--email/--token, then \
ZENDESK_SUBDOMAIN/ZENDESK_EMAIL/ZENDESK_TOKEN (a .env file is honoured), then \
zendesk-settings.json in the working directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: RootCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RootCommand {
    /// Export tickets to a Markdown file
    Tickets(TicketsCommand),
    /// Write a sample zendesk-settings.json
    Config(ConfigCommand),
    /// Check that the configured credentials can reach Zendesk
    Test(TestCommand),
}

impl Cli {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.command {
            RootCommand::Tickets(cmd) => cmd.execute(ctx).await,
            RootCommand::Config(cmd) => cmd.execute(ctx).await,
            RootCommand::Test(cmd) => cmd.execute(ctx).await,
        }
    }
}

/// Credential flags shared by every command that talks to Zendesk.
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Zendesk subdomain (the `acme` in acme.zendesk.com)
    #[arg(long)]
    pub subdomain: Option<String>,
    /// Zendesk account email address
    #[arg(long)]
    pub email: Option<String>,
    /// Zendesk API token
    #[arg(long)]
    pub token: Option<String>,
}

impl CredentialArgs {
    pub fn to_partial(&self) -> PartialCredentials {
        PartialCredentials {
            subdomain: self.subdomain.clone(),
            email: self.email.clone(),
            token: self.token.clone(),
        }
    }
}
