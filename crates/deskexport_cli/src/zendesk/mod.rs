mod client;
mod types;

pub use client::ZendeskClient;
pub use types::ZendeskUser;
