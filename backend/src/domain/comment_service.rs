//! Comment thread domain services.
//!
//! Posting appends to storage first and publishes the event afterwards, so a
//! subscriber reacting to the event always finds the comment when it
//! re-reads the thread.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::comment::{Comment, CommentPosted, PostRef, validate_comment_content};
use crate::domain::ports::{
    CommentChannel, CommentCommand, CommentQuery, CommentRepository, CommentRepositoryError,
    CommentSubscription, NewComment, PostCommentRequest, ProfileStore,
};

/// Display name used when the author has no profile.
const ANONYMOUS_AUTHOR: &str = "Anonymous";

fn map_repository_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::persistence(format!("comment store unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::persistence(format!("comment store error: {message}"))
        }
    }
}

/// Comment service implementing the driving ports.
#[derive(Clone)]
pub struct CommentService<R, H, P> {
    comments: Arc<R>,
    channel: Arc<H>,
    profiles: Arc<P>,
}

impl<R, H, P> CommentService<R, H, P> {
    /// Create a new service with the given adapters.
    pub fn new(comments: Arc<R>, channel: Arc<H>, profiles: Arc<P>) -> Self {
        Self {
            comments,
            channel,
            profiles,
        }
    }
}

impl<R, H, P> CommentService<R, H, P>
where
    R: CommentRepository,
    H: CommentChannel,
    P: ProfileStore,
{
    async fn author_name(&self, actor: Identity) -> String {
        match self.profiles.find_by_user_id(actor.user_id).await {
            Ok(Some(profile)) => profile.display_name,
            Ok(None) => ANONYMOUS_AUTHOR.to_owned(),
            Err(err) => {
                warn!(user_id = %actor.user_id, error = %err, "author name lookup failed");
                ANONYMOUS_AUTHOR.to_owned()
            }
        }
    }
}

#[async_trait]
impl<R, H, P> CommentCommand for CommentService<R, H, P>
where
    R: CommentRepository,
    H: CommentChannel,
    P: ProfileStore,
{
    async fn post(&self, actor: Identity, request: PostCommentRequest) -> Result<Comment, Error> {
        let content = validate_comment_content(&request.content)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let author_name = self.author_name(actor).await;

        let comment = self
            .comments
            .append(&NewComment {
                post: request.post,
                author: actor.user_id,
                author_name,
                content,
            })
            .await
            .map_err(map_repository_error)?;

        // The comment is durable; a failed publish only delays viewers until
        // their next full read.
        if let Err(err) = self
            .channel
            .publish(CommentPosted {
                post: comment.post,
                comment_id: comment.id,
            })
            .await
        {
            warn!(post = %comment.post, error = %err, "comment event publish failed");
        }
        Ok(comment)
    }
}

#[async_trait]
impl<R, H, P> CommentQuery for CommentService<R, H, P>
where
    R: CommentRepository,
    H: CommentChannel,
    P: ProfileStore,
{
    async fn list_for(&self, post: PostRef) -> Result<Vec<Comment>, Error> {
        self.comments
            .list_for(post)
            .await
            .map_err(map_repository_error)
    }

    async fn subscribe(&self, post: PostRef) -> Result<Box<dyn CommentSubscription>, Error> {
        self.channel
            .subscribe(post)
            .await
            .map_err(|err| Error::internal(err.to_string()))
    }
}
