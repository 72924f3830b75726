//! Ticket aggregation and rendering for helpdesk exports.
//!
//! Raw tickets go through [`TicketAggregator`], which resolves every actor
//! via a run-scoped [`ActorResolver`] and enriches comments with their
//! author's role. The resulting [`NormalizedTicket`]s are turned into a
//! single Markdown document by [`render::render_batch`].

pub mod aggregate;
pub mod enrich;
pub mod model;
pub mod render;
pub mod resolver;
pub mod source;
pub mod time;

#[cfg(test)]
mod fakes;

pub use aggregate::{
    BatchProgress, BatchSummary, BatchTally, PacingPolicy, TicketAggregator,
    TicketConversionError,
};
pub use enrich::CommentEnricher;
pub use model::{
    ActorProfile, ActorRole, Attachment, CommentRole, CustomField, EnrichedComment,
    NormalizedTicket, RawComment, RawTicket,
};
pub use resolver::{ActorResolver, ResolverStats};
pub use source::{ActorDirectory, ActorRecord, CommentSource, TicketFilter, TicketSource};
