use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::app::AppContext;
use crate::commands::CliCommand;
use crate::config;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigCommand {
    /// Overwrite an existing settings file
    #[arg(long)]
    pub force: bool,
}

#[async_trait]
impl CliCommand for ConfigCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let path = config::write_sample_settings(ctx.working_dir(), self.force)?;
        println!("Wrote sample settings to {}", path.display());
        println!("Fill in your subdomain, email and API token before exporting.");
        Ok(())
    }
}
