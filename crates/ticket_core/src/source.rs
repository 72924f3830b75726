use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{RawComment, RawTicket};

/// What the user directory knows about one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub name: String,
    pub role: String,
}

/// Ticket selection criteria. Empty means every ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub tags: Vec<String>,
    pub form_id: Option<String>,
    pub statuses: Vec<String>,
}

impl TicketFilter {
    /// Search expression for the helpdesk search API, or `None` for an unfiltered listing.
    pub fn search_query(&self) -> Option<String> {
        let mut parts = Vec::new();

        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|tag| format!("tags:{}", tag)).collect();
            parts.push(tags.join(" "));
        }

        if let Some(form_id) = &self.form_id {
            parts.push(format!("ticket_form_id:{}", form_id));
        }

        if !self.statuses.is_empty() {
            let statuses: Vec<String> = self
                .statuses
                .iter()
                .map(|status| format!("status:{}", status))
                .collect();
            parts.push(format!("({})", statuses.join(" OR ")));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" AND "))
        }
    }
}

#[async_trait]
pub trait ActorDirectory: Send + Sync {
    async fn lookup_actor(&self, id: u64) -> Result<ActorRecord>;
}

#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn list_comments(&self, ticket_id: u64) -> Result<Vec<RawComment>>;
}

#[async_trait]
pub trait TicketSource: Send + Sync {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<RawTicket>>;
}

#[async_trait]
impl<T: ActorDirectory + ?Sized> ActorDirectory for Arc<T> {
    async fn lookup_actor(&self, id: u64) -> Result<ActorRecord> {
        (**self).lookup_actor(id).await
    }
}

#[async_trait]
impl<T: CommentSource + ?Sized> CommentSource for Arc<T> {
    async fn list_comments(&self, ticket_id: u64) -> Result<Vec<RawComment>> {
        (**self).list_comments(ticket_id).await
    }
}

#[async_trait]
impl<T: TicketSource + ?Sized> TicketSource for Arc<T> {
    async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<RawTicket>> {
        (**self).list_tickets(filter).await
    }
}
