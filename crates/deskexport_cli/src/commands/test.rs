use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::app::AppContext;
use crate::commands::{CliCommand, CredentialArgs};
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::zendesk::ZendeskClient;

#[derive(Args, Debug, Clone)]
pub struct TestCommand {
    #[command(flatten)]
    pub credentials: CredentialArgs,
    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[async_trait]
impl CliCommand for TestCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let credentials = ctx.credentials(self.credentials.to_partial())?;
        println!("Testing connection to {}", credentials.host());
        println!("  Email: {}", credentials.email);

        let client = ZendeskClient::new(&credentials, Duration::from_secs(self.timeout_secs))?;
        if client.test_connection().await {
            println!("✓ Connected to Zendesk");
            Ok(())
        } else {
            anyhow::bail!("could not connect to {}", credentials.host())
        }
    }
}
