//! Driving port for news post reads.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::news::{NewsPost, NewsPostId};

/// Driving port for news read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsQuery: Send + Sync {
    /// List posts newest-first.
    async fn list(&self) -> Result<Vec<NewsPost>, Error>;

    /// Fetch a post by id.
    async fn get(&self, id: NewsPostId) -> Result<NewsPost, Error>;
}

/// Fixture query serving no posts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNewsQuery;

#[async_trait]
impl NewsQuery for FixtureNewsQuery {
    async fn list(&self) -> Result<Vec<NewsPost>, Error> {
        Ok(Vec::new())
    }

    async fn get(&self, id: NewsPostId) -> Result<NewsPost, Error> {
        Err(Error::not_found(format!("news post {id} not found")))
    }
}
