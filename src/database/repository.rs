use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Commons, UserCommons};

/// Errors raised by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Storage for commons records.
///
/// `save` follows ORM semantics: a record without an id is inserted and
/// receives a fresh id, a record with an id replaces the stored row. Saving
/// with an id that is no longer stored fails with `NotFound` rather than
/// recreating the row.
#[async_trait]
pub trait CommonsRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Commons>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Commons>, RepositoryError>;

    async fn save(&self, commons: Commons) -> Result<Commons, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Cheap round trip used by the health endpoint
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Storage for commons memberships
#[async_trait]
pub trait UserCommonsRepository: Send + Sync {
    async fn find_by_commons_id_and_user_id(
        &self,
        commons_id: i64,
        user_id: i64,
    ) -> Result<Option<UserCommons>, RepositoryError>;

    async fn save(&self, user_commons: UserCommons) -> Result<UserCommons, RepositoryError>;
}
