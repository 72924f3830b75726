use serde::Deserialize;
use ticket_core::{RawComment, RawTicket};

pub(super) const API_PATH: &str = "api/v2";
pub(super) const USERS_ME: &str = "users/me.json";
pub(super) const TICKETS: &str = "tickets.json";
pub(super) const SEARCH: &str = "search.json";

#[derive(Debug, Clone, Deserialize)]
pub struct ZendeskUser {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "end-user".to_string()
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEnvelope {
    pub user: ZendeskUser,
}

/// A page of a cursor-less listing; `next_page` is an absolute URL.
pub(super) trait Page {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

#[derive(Debug, Deserialize)]
pub(super) struct TicketsPage {
    #[serde(default)]
    pub tickets: Vec<RawTicket>,
    #[serde(default)]
    pub next_page: Option<String>,
}

impl Page for TicketsPage {
    type Item = RawTicket;

    fn into_parts(self) -> (Vec<RawTicket>, Option<String>) {
        (self.tickets, self.next_page)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchPage {
    #[serde(default)]
    pub results: Vec<RawTicket>,
    #[serde(default)]
    pub next_page: Option<String>,
}

impl Page for SearchPage {
    type Item = RawTicket;

    fn into_parts(self) -> (Vec<RawTicket>, Option<String>) {
        (self.results, self.next_page)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentsPage {
    #[serde(default)]
    pub comments: Vec<RawComment>,
    #[serde(default)]
    pub next_page: Option<String>,
}

impl Page for CommentsPage {
    type Item = RawComment;

    fn into_parts(self) -> (Vec<RawComment>, Option<String>) {
        (self.comments, self.next_page)
    }
}
