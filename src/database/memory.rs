use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::database::models::{Commons, UserCommons};
use crate::database::repository::{CommonsRepository, RepositoryError, UserCommonsRepository};

/// Process-local commons storage, ordered by id
#[derive(Debug, Default)]
pub struct InMemoryCommonsRepository {
    rows: RwLock<BTreeMap<i64, Commons>>,
    next_id: AtomicI64,
}

impl InMemoryCommonsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records, keeping their ids. Records without an id
    /// are numbered after the highest explicit one.
    pub fn with_records(records: impl IntoIterator<Item = Commons>) -> Self {
        let records: Vec<Commons> = records.into_iter().collect();
        let mut next_id = records.iter().filter_map(|r| r.id).max().unwrap_or(0);

        let mut rows = BTreeMap::new();
        for record in records {
            let id = match record.id {
                Some(id) => id,
                None => {
                    next_id += 1;
                    next_id
                }
            };
            rows.insert(id, Commons { id: Some(id), ..record });
        }
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicI64::new(next_id),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl CommonsRepository for InMemoryCommonsRepository {
    async fn find_all(&self) -> Result<Vec<Commons>, RepositoryError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Commons>, RepositoryError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, commons: Commons) -> Result<Commons, RepositoryError> {
        let mut rows = self.rows.write().await;
        let id = match commons.id {
            Some(id) if rows.contains_key(&id) => id,
            Some(id) => return Err(RepositoryError::NotFound { entity: Commons::ENTITY, id }),
            None => self.allocate_id(),
        };
        let saved = Commons { id: Some(id), ..commons };
        rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        self.rows.write().await.remove(&id);
        Ok(())
    }
}

/// Process-local membership storage
#[derive(Debug, Default)]
pub struct InMemoryUserCommonsRepository {
    rows: RwLock<BTreeMap<i64, UserCommons>>,
    next_id: AtomicI64,
}

impl InMemoryUserCommonsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl UserCommonsRepository for InMemoryUserCommonsRepository {
    async fn find_by_commons_id_and_user_id(
        &self,
        commons_id: i64,
        user_id: i64,
    ) -> Result<Option<UserCommons>, RepositoryError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|uc| uc.commons_id == commons_id && uc.user_id == user_id)
            .cloned())
    }

    async fn save(&self, user_commons: UserCommons) -> Result<UserCommons, RepositoryError> {
        let mut rows = self.rows.write().await;
        let id = match user_commons.id {
            Some(id) if rows.contains_key(&id) => id,
            Some(id) => {
                return Err(RepositoryError::NotFound { entity: UserCommons::ENTITY, id })
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        let saved = UserCommons { id: Some(id), ..user_commons };
        rows.insert(id, saved.clone());
        Ok(saved)
    }
}
