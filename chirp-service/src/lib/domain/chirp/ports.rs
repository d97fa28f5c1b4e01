use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a new chirp for an authenticated user.
    ///
    /// Profane words are masked before the chirp is stored.
    ///
    /// # Arguments
    /// * `user_id` - Authenticated author
    /// * `body` - Validated chirp body
    ///
    /// # Returns
    /// Created chirp entity
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, user_id: UserId, body: ChirpBody) -> Result<Chirp, ChirpError>;

    /// Retrieve a chirp by unique identifier.
    ///
    /// # Arguments
    /// * `id` - Chirp ID
    ///
    /// # Returns
    /// Chirp entity
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally restricted to a single author.
    ///
    /// # Arguments
    /// * `author` - Optional author filter
    ///
    /// # Returns
    /// Chirps ordered by creation time ascending
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_chirps(&self, author: Option<UserId>) -> Result<Vec<Chirp>, ChirpError>;

    /// Delete a chirp on behalf of its author.
    ///
    /// # Arguments
    /// * `id` - Chirp ID to delete
    /// * `requester` - Authenticated user requesting the deletion
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Forbidden` - Requester is not the chirp's author
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, id: &ChirpId, requester: &UserId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirp aggregate.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist new chirp to storage.
    ///
    /// # Arguments
    /// * `chirp` - Chirp entity to create
    ///
    /// # Returns
    /// Created chirp entity
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Arguments
    /// * `id` - Chirp ID
    ///
    /// # Returns
    /// Optional chirp entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Retrieve all chirps ordered by creation time ascending.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve one author's chirps ordered by creation time ascending.
    ///
    /// # Arguments
    /// * `author` - Author user ID
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Chirp>, ChirpError>;

    /// Remove chirp from storage.
    ///
    /// # Arguments
    /// * `id` - Chirp ID to delete
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError>;
}
