use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role string as reported by the helpdesk user directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorRole {
    EndUser,
    Agent,
    Admin,
    Other(String),
}

impl ActorRole {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "end-user" | "end_user" | "enduser" => ActorRole::EndUser,
            "agent" => ActorRole::Agent,
            "admin" => ActorRole::Admin,
            _ => ActorRole::Other(raw.to_string()),
        }
    }

    /// Agents and admins answer tickets on the helpdesk side.
    pub fn is_staff(&self) -> bool {
        matches!(self, ActorRole::Agent | ActorRole::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorProfile {
    pub id: u64,
    pub display_name: String,
    pub role: ActorRole,
    pub is_placeholder: bool,
}

impl ActorProfile {
    /// Stand-in used when the directory lookup for `id` fails.
    pub fn placeholder(id: u64) -> Self {
        Self {
            id,
            display_name: format!("User {}", id),
            role: ActorRole::EndUser,
            is_placeholder: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTicket {
    pub id: u64,
    #[serde(default)]
    pub subject: Option<String>,
    pub status: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, rename = "type")]
    pub ticket_type: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub requester_id: u64,
    #[serde(default)]
    pub assignee_id: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: u64,
    #[serde(default)]
    pub value: Option<Value>,
}

impl CustomField {
    /// Display text for the field, or `None` when there is nothing worth showing.
    pub fn display_value(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            Value::Array(items) if items.is_empty() => None,
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::Object(map) if map.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_url: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    pub id: u64,
    pub author_id: u64,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub plain_body: String,
    #[serde(rename = "public", default = "default_public")]
    pub is_public: bool,
    pub created_at: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

fn default_public() -> bool {
    true
}

impl RawComment {
    pub fn display_body(&self) -> &str {
        if self.plain_body.is_empty() {
            &self.body
        } else {
            &self.plain_body
        }
    }
}

/// Who wrote a comment, relative to the ticket it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentRole {
    Requester,
    Agent,
    Collaborator,
}

impl CommentRole {
    pub fn classify(author_id: u64, requester_id: u64, author: &ActorProfile) -> Self {
        if author_id == requester_id {
            CommentRole::Requester
        } else if author.role.is_staff() {
            CommentRole::Agent
        } else {
            CommentRole::Collaborator
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            CommentRole::Requester => " (Requester)",
            CommentRole::Agent => " (Agent)",
            CommentRole::Collaborator => " (Collaborator)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedComment {
    pub id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub author_role: CommentRole,
    pub body: String,
    pub is_public: bool,
    pub created_at: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTicket {
    pub id: u64,
    pub subject: String,
    pub status: String,
    pub priority: Option<String>,
    pub ticket_type: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub requester_name: String,
    pub assignee_name: Option<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub comments: Vec<EnrichedComment>,
    pub custom_fields: Vec<CustomField>,
}
