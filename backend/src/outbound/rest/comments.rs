//! REST comment repository.

use async_trait::async_trait;

use super::client::{RestClient, RestClientError};
use super::rows::{CommentRow, CommentWriteRow};
use crate::domain::comment::{Comment, PostRef};
use crate::domain::ports::{CommentRepository, CommentRepositoryError, NewComment};

const TABLE: &str = "rest/v1/comments";

fn map_error(error: RestClientError) -> CommentRepositoryError {
    match error {
        RestClientError::Timeout | RestClientError::Network { .. } => {
            CommentRepositoryError::Connection {
                message: error.to_string(),
            }
        }
        RestClientError::Status { .. } | RestClientError::Decode { .. } => {
            CommentRepositoryError::Query {
                message: error.to_string(),
            }
        }
    }
}

/// [`CommentRepository`] adapter over the hosted store.
#[derive(Debug, Clone)]
pub struct RestCommentRepository {
    client: RestClient,
}

impl RestCommentRepository {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommentRepository for RestCommentRepository {
    async fn append(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let row: CommentRow = self
            .client
            .insert_row(
                TABLE,
                &CommentWriteRow {
                    post_type: comment.post.post_type.to_string(),
                    post_id: comment.post.post_id,
                    user_id: comment.author,
                    author_name: &comment.author_name,
                    content: &comment.content,
                },
            )
            .await
            .map_err(map_error)?;
        row.into_domain()
            .map_err(|message| CommentRepositoryError::Query { message })
    }

    async fn list_for(&self, post: PostRef) -> Result<Vec<Comment>, CommentRepositoryError> {
        let type_filter = format!("eq.{}", post.post_type);
        let id_filter = format!("eq.{}", post.post_id);
        let rows: Vec<CommentRow> = self
            .client
            .get_rows(
                TABLE,
                &[
                    ("select", "*"),
                    ("post_type", &type_filter),
                    ("post_id", &id_filter),
                    ("order", "created_at.desc,id.desc"),
                ],
            )
            .await
            .map_err(map_error)?;
        rows.into_iter()
            .map(|row| {
                row.into_domain()
                    .map_err(|message| CommentRepositoryError::Query { message })
            })
            .collect()
    }
}
