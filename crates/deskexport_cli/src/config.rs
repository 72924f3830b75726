use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "zendesk-settings.json";
pub const DEFAULT_OUTPUT: &str = "tickets.md";
pub const DEFAULT_PACE_MS: u64 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SUBDOMAIN_VAR: &str = "ZENDESK_SUBDOMAIN";
const EMAIL_VAR: &str = "ZENDESK_EMAIL";
const TOKEN_VAR: &str = "ZENDESK_TOKEN";

/// One layer of credential sources: settings file, environment, or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialCredentials {
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl PartialCredentials {
    pub fn from_env() -> Self {
        Self {
            subdomain: non_empty(env::var(SUBDOMAIN_VAR).ok()),
            email: non_empty(env::var(EMAIL_VAR).ok()),
            token: non_empty(env::var(TOKEN_VAR).ok()),
        }
    }

    /// Values present in `higher` win over the ones in `self`.
    pub fn overlay(self, higher: PartialCredentials) -> Self {
        Self {
            subdomain: non_empty(higher.subdomain).or(non_empty(self.subdomain)),
            email: non_empty(higher.email).or(non_empty(self.email)),
            token: non_empty(higher.token).or(non_empty(self.token)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub subdomain: String,
    pub email: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("subdomain", &self.subdomain)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn host(&self) -> String {
        format!("{}.zendesk.com", self.subdomain)
    }
}

pub fn load_settings_file(dir: &Path) -> Result<PartialCredentials> {
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(PartialCredentials::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Merges the layers (CLI > environment > settings file) and validates the result.
pub fn resolve_credentials(
    file: &PartialCredentials,
    env: PartialCredentials,
    cli: PartialCredentials,
) -> Result<Credentials> {
    let merged = file.clone().overlay(env).overlay(cli);

    let subdomain = merged
        .subdomain
        .with_context(|| missing_message("subdomain", SUBDOMAIN_VAR))?;
    let email = merged
        .email
        .with_context(|| missing_message("email address", EMAIL_VAR))?;
    let token = merged
        .token
        .with_context(|| missing_message("API token", TOKEN_VAR))?;

    let credentials = Credentials {
        subdomain: subdomain.trim().to_string(),
        email: email.trim().to_string(),
        token: token.trim().to_string(),
    };
    validate(&credentials)?;
    Ok(credentials)
}

fn missing_message(what: &str, var: &str) -> String {
    format!(
        "Zendesk {} is not configured. Set {} or create {}.",
        what, var, SETTINGS_FILE
    )
}

pub fn validate(credentials: &Credentials) -> Result<()> {
    if credentials.subdomain.is_empty() || credentials.subdomain.contains('/') {
        anyhow::bail!("invalid subdomain `{}`", credentials.subdomain);
    }
    if !credentials.email.contains('@') {
        anyhow::bail!("invalid email address `{}`", credentials.email);
    }
    if credentials.token.is_empty() {
        anyhow::bail!("invalid API token");
    }
    Ok(())
}

pub fn write_sample_settings(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(SETTINGS_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    let sample = PartialCredentials {
        subdomain: Some("your-subdomain".to_string()),
        email: Some("your-email@example.com".to_string()),
        token: Some("your-api-token".to_string()),
    };
    let body = serde_json::to_string_pretty(&sample)?;
    fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Splits a comma-separated tag list, trimming whitespace and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
