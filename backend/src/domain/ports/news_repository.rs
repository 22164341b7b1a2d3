//! Port for news post persistence.

use async_trait::async_trait;

use crate::domain::news::{NewsDraft, NewsPost, NewsPostId};

/// Errors raised by news repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewsRepositoryError {
    /// The backing store could not be reached.
    #[error("news store connection failed: {message}")]
    Connection {
        /// Adapter-level failure detail.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("news store query failed: {message}")]
    Query {
        /// Adapter-level failure detail.
        message: String,
    },
    /// No post exists with the given id.
    #[error("news post {id} not found")]
    NotFound {
        /// The missing post id.
        id: NewsPostId,
    },
}

/// Port for news post storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// List posts newest-first.
    async fn list(&self) -> Result<Vec<NewsPost>, NewsRepositoryError>;

    /// Fetch a post by id.
    async fn find_by_id(&self, id: NewsPostId)
    -> Result<Option<NewsPost>, NewsRepositoryError>;

    /// Publish a post.
    async fn create(&self, draft: &NewsDraft) -> Result<NewsPost, NewsRepositoryError>;

    /// Replace a post's fields.
    async fn update(
        &self,
        id: NewsPostId,
        draft: &NewsDraft,
    ) -> Result<NewsPost, NewsRepositoryError>;

    /// Delete a post.
    async fn delete(&self, id: NewsPostId) -> Result<(), NewsRepositoryError>;
}

/// Fixture implementation holding no posts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNewsRepository;

#[async_trait]
impl NewsRepository for FixtureNewsRepository {
    async fn list(&self) -> Result<Vec<NewsPost>, NewsRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: NewsPostId,
    ) -> Result<Option<NewsPost>, NewsRepositoryError> {
        Ok(None)
    }

    async fn create(&self, _draft: &NewsDraft) -> Result<NewsPost, NewsRepositoryError> {
        Err(NewsRepositoryError::Query {
            message: "fixture repository does not store posts".to_owned(),
        })
    }

    async fn update(
        &self,
        id: NewsPostId,
        _draft: &NewsDraft,
    ) -> Result<NewsPost, NewsRepositoryError> {
        Err(NewsRepositoryError::NotFound { id })
    }

    async fn delete(&self, id: NewsPostId) -> Result<(), NewsRepositoryError> {
        Err(NewsRepositoryError::NotFound { id })
    }
}
