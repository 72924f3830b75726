use crate::model::{CommentRole, EnrichedComment, RawComment};
use crate::resolver::ActorResolver;
use crate::source::ActorDirectory;

/// Attaches author names and roles to raw comments.
pub struct CommentEnricher<'a, D> {
    resolver: &'a ActorResolver<D>,
}

impl<'a, D: ActorDirectory> CommentEnricher<'a, D> {
    pub fn new(resolver: &'a ActorResolver<D>) -> Self {
        Self { resolver }
    }

    pub async fn enrich(&self, comment: RawComment, requester_id: u64) -> EnrichedComment {
        let author = self.resolver.resolve(comment.author_id).await;
        let author_role = CommentRole::classify(comment.author_id, requester_id, &author);
        let body = comment.display_body().to_string();

        EnrichedComment {
            id: comment.id,
            author_id: comment.author_id,
            author_name: author.display_name,
            author_role,
            body,
            is_public: comment.is_public,
            created_at: comment.created_at,
            attachments: comment.attachments,
        }
    }
}
