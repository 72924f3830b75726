//! In-memory collaborators for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::model::{
    Attachment, CommentRole, CustomField, EnrichedComment, NormalizedTicket, RawComment, RawTicket,
};
use crate::source::{ActorDirectory, ActorRecord, CommentSource};

#[derive(Default)]
pub struct FakeDirectory {
    actors: Mutex<HashMap<u64, ActorRecord>>,
    lookups: Mutex<HashMap<u64, usize>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(self, id: u64, name: &str, role: &str) -> Self {
        self.insert_actor(id, name, role);
        self
    }

    pub fn insert_actor(&self, id: u64, name: &str, role: &str) {
        self.actors.lock().unwrap().insert(
            id,
            ActorRecord {
                name: name.to_string(),
                role: role.to_string(),
            },
        );
    }

    pub fn lookups_for(&self, id: u64) -> usize {
        self.lookups.lock().unwrap().get(&id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ActorDirectory for FakeDirectory {
    async fn lookup_actor(&self, id: u64) -> Result<ActorRecord> {
        *self.lookups.lock().unwrap().entry(id).or_insert(0) += 1;
        // Yield so concurrent callers actually interleave.
        tokio::task::yield_now().await;
        self.actors
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("user {} not found", id))
    }
}

#[derive(Default)]
pub struct FakeComments {
    comments: HashMap<u64, Vec<RawComment>>,
    failing: HashSet<u64>,
}

impl FakeComments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(mut self, ticket_id: u64, comments: Vec<RawComment>) -> Self {
        self.comments.insert(ticket_id, comments);
        self
    }

    pub fn failing_for(mut self, ticket_id: u64) -> Self {
        self.failing.insert(ticket_id);
        self
    }
}

#[async_trait]
impl CommentSource for FakeComments {
    async fn list_comments(&self, ticket_id: u64) -> Result<Vec<RawComment>> {
        if self.failing.contains(&ticket_id) {
            return Err(anyhow!("comment endpoint returned 500 for ticket {}", ticket_id));
        }
        Ok(self.comments.get(&ticket_id).cloned().unwrap_or_default())
    }
}

pub fn raw_ticket(id: u64, subject: &str, requester_id: u64, assignee_id: Option<u64>) -> RawTicket {
    RawTicket {
        id,
        subject: Some(subject.to_string()),
        status: "open".to_string(),
        priority: Some("high".to_string()),
        ticket_type: Some("incident".to_string()),
        created_at: "2023-01-01T10:00:00Z".to_string(),
        updated_at: "2023-01-02T15:30:00Z".to_string(),
        requester_id,
        assignee_id,
        tags: vec!["bug".to_string(), "urgent".to_string()],
        description: Some("<p>Printer &amp; scanner offline</p>".to_string()),
        custom_fields: Vec::new(),
    }
}

pub fn raw_comment(id: u64, author_id: u64, body: &str, created_at: &str) -> RawComment {
    RawComment {
        id,
        author_id,
        body: body.to_string(),
        plain_body: String::new(),
        is_public: true,
        created_at: created_at.to_string(),
        attachments: Vec::new(),
    }
}

pub fn attachment(file_name: &str, size_bytes: u64) -> Attachment {
    Attachment {
        file_name: file_name.to_string(),
        content_url: format!("https://example.com/{}", file_name),
        size_bytes,
    }
}

/// A fully populated ticket with one public and one internal comment.
pub fn sample_ticket() -> NormalizedTicket {
    NormalizedTicket {
        id: 123,
        subject: "Test".to_string(),
        status: "open".to_string(),
        priority: Some("high".to_string()),
        ticket_type: Some("incident".to_string()),
        created_at: "2023-01-01T10:00:00Z".to_string(),
        updated_at: "2023-01-02T15:30:00Z".to_string(),
        requester_name: "Alice".to_string(),
        assignee_name: Some("User 1002".to_string()),
        tags: vec!["bug".to_string(), "urgent".to_string()],
        description: "<p>Printer &amp; scanner offline</p>".to_string(),
        comments: vec![
            EnrichedComment {
                id: 1,
                author_id: 1001,
                author_name: "Alice".to_string(),
                author_role: CommentRole::Requester,
                body: "First comment".to_string(),
                is_public: true,
                created_at: "2023-01-01T10:05:00Z".to_string(),
                attachments: Vec::new(),
            },
            EnrichedComment {
                id: 2,
                author_id: 2001,
                author_name: "Bob".to_string(),
                author_role: CommentRole::Agent,
                body: "Looking into it".to_string(),
                is_public: false,
                created_at: "not a timestamp".to_string(),
                attachments: vec![attachment("screenshot.png", 1024)],
            },
        ],
        custom_fields: vec![
            CustomField {
                id: 1,
                value: Some(serde_json::json!("gold plan")),
            },
            CustomField {
                id: 2,
                value: Some(serde_json::json!(null)),
            },
        ],
    }
}
