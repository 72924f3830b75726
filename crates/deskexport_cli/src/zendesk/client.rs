use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use ticket_core::{
    ActorDirectory, ActorRecord, CommentSource, RawComment, RawTicket, TicketFilter, TicketSource,
};

use super::types::{
    CommentsPage, Page, SearchPage, TicketsPage, UserEnvelope, ZendeskUser, API_PATH, SEARCH,
    TICKETS, USERS_ME,
};
use crate::config::Credentials;

pub struct ZendeskClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    token: String,
}

impl ZendeskClient {
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: format!("https://{}/{}", credentials.host(), API_PATH),
            email: credentials.email.clone(),
            token: credentials.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn current_user(&self) -> Result<ZendeskUser> {
        let envelope: UserEnvelope = self.get_json(&self.endpoint(USERS_ME)).await?;
        Ok(envelope.user)
    }

    pub async fn test_connection(&self) -> bool {
        match self.current_user().await {
            Ok(user) => {
                debug!(user_id = user.id, "connection test succeeded");
                true
            }
            Err(err) => {
                warn!(error = %err, "Zendesk connection test failed");
                false
            }
        }
    }

    pub async fn user(&self, id: u64) -> Result<ZendeskUser> {
        let envelope: UserEnvelope = self
            .get_json(&self.endpoint(&format!("users/{}.json", id)))
            .await
            .with_context(|| format!("Failed to fetch user {}", id))?;
        Ok(envelope.user)
    }

    pub async fn search_tickets(&self, query: &str) -> Result<Vec<RawTicket>> {
        let full_query = format!("type:ticket {}", query);
        let url = Url::parse_with_params(&self.endpoint(SEARCH), &[("query", full_query.as_str())])
            .context("Failed to build search URL")?;
        self.collect_pages::<SearchPage>(url.to_string()).await
    }

    pub async fn list_all_tickets(&self) -> Result<Vec<RawTicket>> {
        self.collect_pages::<TicketsPage>(self.endpoint(TICKETS))
            .await
    }

    pub async fn ticket_comments(&self, ticket_id: u64) -> Result<Vec<RawComment>> {
        let url = self.endpoint(&format!(
            "tickets/{}/comments.json?sort_order=asc",
            ticket_id
        ));
        self.collect_pages::<CommentsPage>(url)
            .await
            .with_context(|| format!("Failed to fetch comments for ticket {}", ticket_id))
    }

    async fn collect_pages<P>(&self, first_url: String) -> Result<Vec<P::Item>>
    where
        P: Page + DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut next = Some(first_url);
        let mut pages = 0usize;

        while let Some(url) = next {
            let page: P = self.get_json(&url).await?;
            let (batch, next_page) = page.into_parts();
            pages += 1;
            debug!(url = %url, page = pages, items = batch.len(), "fetched page");
            items.extend(batch);
            next = next_page;
        }

        Ok(items)
    }

    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .basic_auth(format!("{}/token", self.email), Some(&self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            anyhow::bail!("Zendesk API returned status: {}. Body: {}", status, body_text);
        }

        serde_json::from_str(&body_text)
            .with_context(|| format!("Failed to parse Zendesk response from {}", url))
    }
}

#[async_trait]
impl ActorDirectory for ZendeskClient {
    async fn lookup_actor(&self, id: u64) -> Result<ActorRecord> {
        let user = self.user(id).await?;
        Ok(ActorRecord {
            name: user.name,
            role: user.role,
        })
    }
}

#[async_trait]
impl CommentSource for ZendeskClient {
    async fn list_comments(&self, ticket_id: u64) -> Result<Vec<RawComment>> {
        self.ticket_comments(ticket_id).await
    }
}

#[async_trait]
impl TicketSource for ZendeskClient {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<RawTicket>> {
        let tickets = match filter.search_query() {
            Some(query) => self.search_tickets(&query).await,
            None => self.list_all_tickets().await,
        };
        tickets.context("Failed to fetch tickets")
    }
}
