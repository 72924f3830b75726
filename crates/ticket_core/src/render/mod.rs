//! Markdown rendering of normalized tickets.
//!
//! Front-matter keys, section headings and anchors form the document's
//! external contract; downstream tooling diffs and links against them.

mod document;
mod format;
mod ticket;

pub use document::{render_batch, render_batch_at, ticket_anchor};
pub use format::{clean_content, format_file_size, slugify};
pub use ticket::render_ticket;
