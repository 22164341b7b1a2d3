//! News post domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::auth::Identity;
use crate::domain::news::{NewsDraft, NewsPost, NewsPostId};
use crate::domain::ports::{
    NewsCommand, NewsQuery, NewsRepository, NewsRepositoryError, NewsWriteRequest,
};

fn map_repository_error(error: NewsRepositoryError) -> Error {
    match error {
        NewsRepositoryError::Connection { message } => {
            Error::persistence(format!("news store unavailable: {message}"))
        }
        NewsRepositoryError::Query { message } => {
            Error::persistence(format!("news store error: {message}"))
        }
        NewsRepositoryError::NotFound { id } => {
            Error::not_found(format!("news post {id} not found"))
        }
    }
}

fn require_admin(actor: Identity) -> Result<(), Error> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(Error::forbidden("administrator role required"))
    }
}

fn validate_write_request(request: &NewsWriteRequest) -> Result<NewsDraft, Error> {
    NewsDraft::new(
        request.thumbnail_url.clone(),
        &request.organizer_name,
        request.organizer_avatar.clone(),
        &request.description,
    )
    .map_err(|err| Error::invalid_request(err.to_string()))
}

/// News service implementing the driving ports.
#[derive(Clone)]
pub struct NewsService<R> {
    posts: Arc<R>,
}

impl<R> NewsService<R> {
    /// Create a new service over the given repository.
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl<R> NewsQuery for NewsService<R>
where
    R: NewsRepository,
{
    async fn list(&self) -> Result<Vec<NewsPost>, Error> {
        self.posts.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: NewsPostId) -> Result<NewsPost, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("news post {id} not found")))
    }
}

#[async_trait]
impl<R> NewsCommand for NewsService<R>
where
    R: NewsRepository,
{
    async fn create(&self, actor: Identity, request: NewsWriteRequest) -> Result<NewsPost, Error> {
        require_admin(actor)?;
        let draft = validate_write_request(&request)?;
        self.posts.create(&draft).await.map_err(map_repository_error)
    }

    async fn update(
        &self,
        actor: Identity,
        id: NewsPostId,
        request: NewsWriteRequest,
    ) -> Result<NewsPost, Error> {
        require_admin(actor)?;
        let draft = validate_write_request(&request)?;
        self.posts
            .update(id, &draft)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, actor: Identity, id: NewsPostId) -> Result<(), Error> {
        require_admin(actor)?;
        self.posts.delete(id).await.map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockNewsRepository;
    use crate::domain::user::UserId;
    use chrono::Utc;

    fn admin() -> Identity {
        Identity {
            user_id: UserId::random(),
            is_admin: true,
        }
    }

    fn member() -> Identity {
        Identity {
            user_id: UserId::random(),
            is_admin: false,
        }
    }

    fn write_request() -> NewsWriteRequest {
        NewsWriteRequest {
            thumbnail_url: None,
            organizer_name: "Relief Org".to_owned(),
            organizer_avatar: None,
            description: "Road reopened".to_owned(),
        }
    }

    #[tokio::test]
    async fn create_requires_admin() {
        let mut posts = MockNewsRepository::new();
        posts.expect_create().never();

        let service = NewsService::new(Arc::new(posts));
        let error = service
            .create(member(), write_request())
            .await
            .expect_err("non-admin rejected");
        assert_eq!(error.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn create_stores_validated_draft() {
        let mut posts = MockNewsRepository::new();
        posts
            .expect_create()
            .withf(|draft| draft.description == "Road reopened")
            .times(1)
            .returning(|draft| {
                Ok(NewsPost {
                    id: NewsPostId(4),
                    thumbnail_url: draft.thumbnail_url.clone(),
                    organizer_name: draft.organizer_name.clone(),
                    organizer_avatar: draft.organizer_avatar.clone(),
                    description: draft.description.clone(),
                    created_at: Utc::now(),
                })
            });

        let service = NewsService::new(Arc::new(posts));
        let post = service
            .create(admin(), write_request())
            .await
            .expect("create succeeds");
        assert_eq!(post.id, NewsPostId(4));
    }

    #[tokio::test]
    async fn get_maps_missing_posts_to_not_found() {
        let mut posts = MockNewsRepository::new();
        posts.expect_find_by_id().returning(|_| Ok(None));

        let service = NewsService::new(Arc::new(posts));
        let error = service
            .get(NewsPostId(9))
            .await
            .expect_err("missing post is not found");
        assert_eq!(error.code, ErrorCode::NotFound);
    }
}
