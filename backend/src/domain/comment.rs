//! Comments attached to donation campaigns and news posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 2000;

/// The kind of post a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// A donation campaign page.
    Donation,
    /// A news post.
    News,
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Donation => f.write_str("donation"),
            Self::News => f.write_str("news"),
        }
    }
}

impl std::str::FromStr for PostType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donation" => Ok(Self::Donation),
            "news" => Ok(Self::News),
            _ => Err(()),
        }
    }
}

/// Reference to the post a comment thread belongs to.
///
/// Events and subscriptions are keyed on the full pair, so comment traffic
/// for one post never reaches viewers of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRef {
    /// Kind of post.
    pub post_type: PostType,
    /// Identifier within that kind.
    pub post_id: i64,
}

impl std::fmt::Display for PostRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.post_type, self.post_id)
    }
}

/// Identifier of a comment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for comment input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    /// The content was empty after trimming.
    #[error("comment must not be empty")]
    Empty,
    /// The content exceeded the maximum length.
    #[error("comment must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Validate raw comment content.
///
/// # Errors
/// Returns the matching [`CommentValidationError`] variant.
pub fn validate_comment_content(raw: &str) -> Result<String, CommentValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CommentValidationError::Empty);
    }
    if trimmed.chars().count() > COMMENT_MAX {
        return Err(CommentValidationError::TooLong { max: COMMENT_MAX });
    }
    Ok(trimmed.to_owned())
}

/// A comment as stored and served to viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Post the comment is attached to.
    pub post: PostRef,
    /// Authoring user.
    pub author: UserId,
    /// Author's display name at posting time.
    pub author_name: String,
    /// Comment body.
    pub content: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// Event published when a comment is appended to a thread.
///
/// Carries only the post reference and comment id; viewers re-query the full
/// ordered list rather than patching local state from the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentPosted {
    /// Post the new comment is attached to.
    pub post: PostRef,
    /// Identifier of the appended comment.
    pub comment_id: CommentId,
}
