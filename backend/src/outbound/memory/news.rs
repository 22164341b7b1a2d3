//! In-memory news repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::news::{NewsDraft, NewsPost, NewsPostId};
use crate::domain::ports::{NewsRepository, NewsRepositoryError};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    posts: BTreeMap<i64, NewsPost>,
}

/// In-memory [`NewsRepository`] implementation.
#[derive(Debug, Default)]
pub struct MemoryNewsRepository {
    state: RwLock<State>,
}

impl MemoryNewsRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsRepository for MemoryNewsRepository {
    async fn list(&self) -> Result<Vec<NewsPost>, NewsRepositoryError> {
        let state = self.state.read().await;
        let mut posts: Vec<NewsPost> = state.posts.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(posts)
    }

    async fn find_by_id(&self, id: NewsPostId) -> Result<Option<NewsPost>, NewsRepositoryError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id.0).cloned())
    }

    async fn create(&self, draft: &NewsDraft) -> Result<NewsPost, NewsRepositoryError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let post = NewsPost {
            id: NewsPostId(state.next_id),
            thumbnail_url: draft.thumbnail_url.clone(),
            organizer_name: draft.organizer_name.clone(),
            organizer_avatar: draft.organizer_avatar.clone(),
            description: draft.description.clone(),
            created_at: Utc::now(),
        };
        state.posts.insert(post.id.0, post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: NewsPostId,
        draft: &NewsDraft,
    ) -> Result<NewsPost, NewsRepositoryError> {
        let mut state = self.state.write().await;
        let post = state
            .posts
            .get_mut(&id.0)
            .ok_or(NewsRepositoryError::NotFound { id })?;
        post.thumbnail_url = draft.thumbnail_url.clone();
        post.organizer_name = draft.organizer_name.clone();
        post.organizer_avatar = draft.organizer_avatar.clone();
        post.description = draft.description.clone();
        Ok(post.clone())
    }

    async fn delete(&self, id: NewsPostId) -> Result<(), NewsRepositoryError> {
        let mut state = self.state.write().await;
        state
            .posts
            .remove(&id.0)
            .map(|_| ())
            .ok_or(NewsRepositoryError::NotFound { id })
    }
}
