use std::time::Duration;

use tracing::{info, warn};

use crate::enrich::CommentEnricher;
use crate::model::{NormalizedTicket, RawTicket};
use crate::resolver::ActorResolver;
use crate::source::{ActorDirectory, CommentSource};
use crate::time::parse_timestamp;

#[derive(Debug, thiserror::Error)]
#[error("failed to convert ticket {ticket_id}: {cause:#}")]
pub struct TicketConversionError {
    pub ticket_id: u64,
    pub cause: anyhow::Error,
}

/// Wait inserted between consecutive tickets of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacingPolicy {
    #[default]
    None,
    Fixed(Duration),
}

impl PacingPolicy {
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            PacingPolicy::None
        } else {
            PacingPolicy::Fixed(Duration::from_millis(millis))
        }
    }

    async fn pause(&self) {
        if let PacingPolicy::Fixed(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub skipped: Vec<u64>,
}

/// Observer for batch progress. Every hook defaults to a no-op.
pub trait BatchProgress {
    fn started(&mut self, _position: usize, _total: usize, _ticket_id: u64) {}

    fn skipped(&mut self, _error: &TicketConversionError) {}

    fn finished(&mut self, _summary: &BatchSummary) {}
}

impl BatchProgress for () {}

/// Records what happened to each ticket of a batch.
#[derive(Debug, Default)]
pub struct BatchTally {
    pub started: Vec<(usize, usize)>,
    pub skipped: Vec<u64>,
    pub summary: Option<BatchSummary>,
}

impl BatchProgress for BatchTally {
    fn started(&mut self, position: usize, total: usize, _ticket_id: u64) {
        self.started.push((position, total));
    }

    fn skipped(&mut self, error: &TicketConversionError) {
        self.skipped.push(error.ticket_id);
    }

    fn finished(&mut self, summary: &BatchSummary) {
        self.summary = Some(summary.clone());
    }
}

pub struct TicketAggregator<D, C> {
    resolver: ActorResolver<D>,
    comments: C,
    pacing: PacingPolicy,
}

impl<D: ActorDirectory, C: CommentSource> TicketAggregator<D, C> {
    pub fn new(directory: D, comments: C) -> Self {
        Self {
            resolver: ActorResolver::new(directory),
            comments,
            pacing: PacingPolicy::None,
        }
    }

    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn resolver(&self) -> &ActorResolver<D> {
        &self.resolver
    }

    pub async fn aggregate(
        &self,
        ticket: &RawTicket,
    ) -> Result<NormalizedTicket, TicketConversionError> {
        let (requester, assignee) = tokio::join!(self.resolver.resolve(ticket.requester_id), async {
            match ticket.assignee_id {
                Some(id) => Some(self.resolver.resolve(id).await),
                None => None,
            }
        });

        let mut raw_comments = self
            .comments
            .list_comments(ticket.id)
            .await
            .map_err(|cause| TicketConversionError {
                ticket_id: ticket.id,
                cause,
            })?;
        raw_comments.sort_by_cached_key(|comment| parse_timestamp(&comment.created_at));

        let enricher = CommentEnricher::new(&self.resolver);
        let mut comments = Vec::with_capacity(raw_comments.len());
        for comment in raw_comments {
            comments.push(enricher.enrich(comment, ticket.requester_id).await);
        }

        Ok(NormalizedTicket {
            id: ticket.id,
            subject: ticket.subject.clone().unwrap_or_default(),
            status: ticket.status.clone(),
            priority: ticket.priority.clone(),
            ticket_type: ticket.ticket_type.clone(),
            created_at: ticket.created_at.clone(),
            updated_at: ticket.updated_at.clone(),
            requester_name: requester.display_name,
            assignee_name: assignee.map(|profile| profile.display_name),
            tags: ticket.tags.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            comments,
            custom_fields: ticket.custom_fields.clone(),
        })
    }

    /// Converts tickets one after another, skipping the ones that fail.
    pub async fn aggregate_batch<P: BatchProgress>(
        &self,
        tickets: &[RawTicket],
        progress: &mut P,
    ) -> Vec<NormalizedTicket> {
        let total = tickets.len();
        let mut converted = Vec::with_capacity(total);
        let mut skipped = Vec::new();

        for (index, ticket) in tickets.iter().enumerate() {
            progress.started(index + 1, total, ticket.id);

            match self.aggregate(ticket).await {
                Ok(normalized) => converted.push(normalized),
                Err(err) => {
                    warn!(ticket_id = err.ticket_id, error = %err, "skipping ticket");
                    progress.skipped(&err);
                    skipped.push(err.ticket_id);
                }
            }

            if index + 1 < total {
                self.pacing.pause().await;
            }
        }

        let summary = BatchSummary {
            total,
            converted: converted.len(),
            skipped,
        };
        let actors = self.resolver.stats().await;
        info!(
            total = summary.total,
            converted = summary.converted,
            skipped = summary.skipped.len(),
            actors = actors.cached,
            placeholders = actors.placeholders,
            "ticket batch converted"
        );
        progress.finished(&summary);

        converted
    }
}
