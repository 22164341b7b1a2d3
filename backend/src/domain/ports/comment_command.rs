//! Driving port for posting comments.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::comment::{Comment, PostRef};

/// Request to post a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentRequest {
    /// Post the comment is attached to.
    pub post: PostRef,
    /// Raw comment body; trimmed and length-checked before storage.
    pub content: String,
}

/// Driving port for comment write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Append a comment and notify subscribers of its post.
    async fn post(&self, actor: Identity, request: PostCommentRequest)
    -> Result<Comment, Error>;
}

/// Fixture command echoing the comment without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentCommand;

#[async_trait]
impl CommentCommand for FixtureCommentCommand {
    async fn post(
        &self,
        actor: Identity,
        request: PostCommentRequest,
    ) -> Result<Comment, Error> {
        let content = crate::domain::comment::validate_comment_content(&request.content)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Comment {
            id: crate::domain::comment::CommentId(0),
            post: request.post,
            author: actor.user_id,
            author_name: "Anonymous".to_owned(),
            content,
            created_at: chrono::Utc::now(),
        })
    }
}
