use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for chirp operations.
///
/// Concrete implementation of ChirpServicePort with dependency injection.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    /// Create a new chirp service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Chirp persistence implementation
    ///
    /// # Returns
    /// Configured chirp service instance
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, user_id: UserId, body: ChirpBody) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            user_id,
            body: body.censored(),
            created_at: now,
            updated_at: now,
        };

        self.repository.create(chirp).await
    }

    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id.to_string()))
    }

    async fn list_chirps(&self, author: Option<UserId>) -> Result<Vec<Chirp>, ChirpError> {
        match author {
            Some(author) => self.repository.list_by_author(&author).await,
            None => self.repository.list_all().await,
        }
    }

    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError> {
        let chirp = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id.to_string()))?;

        if chirp.user_id != *requester {
            return Err(ChirpError::Forbidden);
        }

        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestChirpRepository {}

        #[async_trait]
        impl ChirpRepository for TestChirpRepository {
            async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;
            async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;
            async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;
            async fn list_by_author(&self, author: &UserId) -> Result<Vec<Chirp>, ChirpError>;
            async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;
        }
    }

    fn chirp_by(author: UserId) -> Chirp {
        Chirp {
            id: ChirpId::new(),
            user_id: author,
            body: ChirpBody::new("hello".to_string()).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_chirp_masks_profanity() {
        let mut repository = MockTestChirpRepository::new();

        repository
            .expect_create()
            .withf(|chirp| chirp.body.as_str() == "what a **** day")
            .times(1)
            .returning(|chirp| Ok(chirp));

        let service = ChirpService::new(Arc::new(repository));

        let body = ChirpBody::new("what a kerfuffle day".to_string()).unwrap();
        let chirp = service.create_chirp(UserId::new(), body).await.unwrap();
        assert_eq!(chirp.body.as_str(), "what a **** day");
    }

    #[tokio::test]
    async fn test_get_chirp_not_found() {
        let mut repository = MockTestChirpRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ChirpService::new(Arc::new(repository));

        let result = service.get_chirp(&ChirpId::new()).await;
        assert!(matches!(result.unwrap_err(), ChirpError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_chirps_by_author() {
        let mut repository = MockTestChirpRepository::new();

        let author = UserId::new();
        let returned = vec![chirp_by(author)];
        repository
            .expect_list_by_author()
            .withf(move |a| *a == author)
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let service = ChirpService::new(Arc::new(repository));

        let chirps = service.list_chirps(Some(author)).await.unwrap();
        assert_eq!(chirps.len(), 1);
        assert_eq!(chirps[0].user_id, author);
    }

    #[tokio::test]
    async fn test_delete_chirp_success() {
        let mut repository = MockTestChirpRepository::new();

        let author = UserId::new();
        let chirp = chirp_by(author);
        let chirp_id = chirp.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(chirp.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == chirp_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = ChirpService::new(Arc::new(repository));

        assert!(service.delete_chirp(&chirp_id, &author).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_chirp_forbidden_for_non_author() {
        let mut repository = MockTestChirpRepository::new();

        let chirp = chirp_by(UserId::new());
        let chirp_id = chirp.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(chirp.clone())));
        repository.expect_delete().times(0);

        let service = ChirpService::new(Arc::new(repository));

        let result = service.delete_chirp(&chirp_id, &UserId::new()).await;
        assert!(matches!(result.unwrap_err(), ChirpError::Forbidden));
    }

    #[tokio::test]
    async fn test_delete_chirp_not_found() {
        let mut repository = MockTestChirpRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ChirpService::new(Arc::new(repository));

        let result = service.delete_chirp(&ChirpId::new(), &UserId::new()).await;
        assert!(matches!(result.unwrap_err(), ChirpError::NotFound(_)));
    }
}
