use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::OnceCell;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;
use crate::config::{self, Credentials, PartialCredentials};

pub struct AppContext {
    working_dir: PathBuf,
    settings: OnceCell<PartialCredentials>,
}

impl AppContext {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            settings: OnceCell::new(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Settings file contents, read on first use.
    pub fn file_settings(&self) -> Result<&PartialCredentials> {
        self.settings
            .get_or_try_init(|| config::load_settings_file(&self.working_dir))
    }

    /// Resolves credentials with `overrides` (usually CLI flags) taking precedence.
    pub fn credentials(&self, overrides: PartialCredentials) -> Result<Credentials> {
        config::resolve_credentials(
            self.file_settings()?,
            PartialCredentials::from_env(),
            overrides,
        )
    }
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let working_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let ctx = AppContext::new(working_dir);
    cli.execute(&ctx).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}
