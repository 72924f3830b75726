use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::Args;
use tracing::info;

use ticket_core::{
    render, ActorDirectory, BatchProgress, CommentSource, PacingPolicy, TicketAggregator,
    TicketFilter, TicketSource,
};

use crate::app::AppContext;
use crate::commands::{CliCommand, CredentialArgs};
use crate::config::{self, DEFAULT_OUTPUT, DEFAULT_PACE_MS, DEFAULT_TIMEOUT_SECS};
use crate::support::fs::write_document;
use crate::support::progress::ConsoleProgress;
use crate::zendesk::ZendeskClient;

#[derive(Args, Debug, Clone)]
pub struct TicketsCommand {
    /// Only export tickets carrying these tags (comma-separated)
    #[arg(long)]
    pub tags: Option<String>,
    /// Only export tickets submitted through this ticket form ID
    #[arg(long)]
    pub form: Option<String>,
    /// Only export tickets in this status (repeatable)
    #[arg(long = "status")]
    pub statuses: Vec<String>,
    /// Output Markdown file
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Pause between tickets in milliseconds; 0 disables pacing
    #[arg(long, default_value_t = DEFAULT_PACE_MS)]
    pub pace_ms: u64,
    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

impl TicketsCommand {
    pub fn filter(&self) -> TicketFilter {
        TicketFilter {
            tags: self
                .tags
                .as_deref()
                .map(config::parse_tags)
                .unwrap_or_default(),
            form_id: self
                .form
                .as_ref()
                .map(|form| form.trim().to_string())
                .filter(|form| !form.is_empty()),
            statuses: self
                .statuses
                .iter()
                .map(|status| status.trim().to_string())
                .filter(|status| !status.is_empty())
                .collect(),
        }
    }
}

#[async_trait]
impl CliCommand for TicketsCommand {
    async fn execute(&self, ctx: &AppContext) -> Result<()> {
        println!("Starting Zendesk ticket export...");
        let credentials = ctx.credentials(self.credentials.to_partial())?;
        let filter = self.filter();

        println!("Target: {}", credentials.host());
        println!("Output: {}", self.output.display());
        if !filter.tags.is_empty() {
            println!("Tag filter: {}", filter.tags.join(", "));
        }
        if let Some(form) = &filter.form_id {
            println!("Form filter: {}", form);
        }
        if !filter.statuses.is_empty() {
            println!("Status filter: {}", filter.statuses.join(", "));
        }

        let client = Arc::new(ZendeskClient::new(
            &credentials,
            Duration::from_secs(self.timeout_secs),
        )?);

        println!("Testing connection to Zendesk...");
        if !client.test_connection().await {
            anyhow::bail!("could not connect to Zendesk; check your settings");
        }
        println!("✓ Connected");

        let aggregator = TicketAggregator::new(client.clone(), client.clone())
            .with_pacing(PacingPolicy::from_millis(self.pace_ms));

        let Some(export) = build_export(client.as_ref(), &aggregator, &filter, |total| {
            println!("✓ Fetched {} tickets", total);
            ConsoleProgress::new(total)
        })
        .await?
        else {
            println!("No tickets matched; nothing to export.");
            return Ok(());
        };

        println!("✓ Converted {} of {} tickets", export.converted, export.fetched);
        if export.skipped > 0 {
            println!("  {} tickets skipped (see errors above)", export.skipped);
        }

        write_document(&self.output, &export.document)?;
        info!(path = %self.output.display(), tickets = export.converted, "export saved");
        println!("✓ Export written to {}", self.output.display());
        Ok(())
    }
}

/// Result of one export run, ready to be written out.
#[derive(Debug)]
pub struct Export {
    pub document: String,
    pub fetched: usize,
    pub converted: usize,
    pub skipped: usize,
}

/// Fetches, converts and renders tickets. Returns `None` when the filter matched nothing.
pub async fn build_export<S, D, C, P, F>(
    source: &S,
    aggregator: &TicketAggregator<D, C>,
    filter: &TicketFilter,
    make_progress: F,
) -> Result<Option<Export>>
where
    S: TicketSource + ?Sized,
    D: ActorDirectory,
    C: CommentSource,
    P: BatchProgress,
    F: FnOnce(usize) -> P,
{
    let tickets = source.list_tickets(filter).await?;
    if tickets.is_empty() {
        return Ok(None);
    }

    let mut progress = make_progress(tickets.len());
    let converted = aggregator.aggregate_batch(&tickets, &mut progress).await;
    let document = render::render_batch(&converted);

    Ok(Some(Export {
        document,
        fetched: tickets.len(),
        converted: converted.len(),
        skipped: tickets.len() - converted.len(),
    }))
}
