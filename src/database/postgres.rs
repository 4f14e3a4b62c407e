use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::{Commons, UserCommons};
use crate::database::repository::{CommonsRepository, RepositoryError, UserCommonsRepository};

const COMMONS_COLUMNS: &str =
    "id, name, cow_price, milk_price, starting_balance, start_date, end_date";

const USER_COMMONS_COLUMNS: &str = "id, user_id, commons_id, total_wealth, avg_cow_health";

/// `CommonsRepository` over the `commons` table
#[derive(Clone)]
pub struct PgCommonsRepository {
    pool: PgPool,
}

impl PgCommonsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, commons: &Commons) -> Result<Commons, RepositoryError> {
        let sql = format!(
            "INSERT INTO commons (name, cow_price, milk_price, starting_balance, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            COMMONS_COLUMNS
        );
        let saved = sqlx::query_as::<_, Commons>(&sql)
            .bind(&commons.name)
            .bind(commons.cow_price)
            .bind(commons.milk_price)
            .bind(commons.starting_balance)
            .bind(commons.start_date)
            .bind(commons.end_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved)
    }

    async fn update(&self, id: i64, commons: &Commons) -> Result<Commons, RepositoryError> {
        let sql = format!(
            "UPDATE commons SET \
                name = $2, \
                cow_price = $3, \
                milk_price = $4, \
                starting_balance = $5, \
                start_date = $6, \
                end_date = $7 \
             WHERE id = $1 \
             RETURNING {}",
            COMMONS_COLUMNS
        );
        sqlx::query_as::<_, Commons>(&sql)
            .bind(id)
            .bind(&commons.name)
            .bind(commons.cow_price)
            .bind(commons.milk_price)
            .bind(commons.starting_balance)
            .bind(commons.start_date)
            .bind(commons.end_date)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound { entity: Commons::ENTITY, id })
    }
}

#[async_trait]
impl CommonsRepository for PgCommonsRepository {
    async fn find_all(&self) -> Result<Vec<Commons>, RepositoryError> {
        let sql = format!("SELECT {} FROM commons ORDER BY id", COMMONS_COLUMNS);
        let rows = sqlx::query_as::<_, Commons>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Commons>, RepositoryError> {
        let sql = format!("SELECT {} FROM commons WHERE id = $1", COMMONS_COLUMNS);
        let row = sqlx::query_as::<_, Commons>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, commons: Commons) -> Result<Commons, RepositoryError> {
        match commons.id {
            Some(id) => self.update(id, &commons).await,
            None => self.insert(&commons).await,
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM commons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `UserCommonsRepository` over the `user_commons` table
#[derive(Clone)]
pub struct PgUserCommonsRepository {
    pool: PgPool,
}

impl PgUserCommonsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserCommonsRepository for PgUserCommonsRepository {
    async fn find_by_commons_id_and_user_id(
        &self,
        commons_id: i64,
        user_id: i64,
    ) -> Result<Option<UserCommons>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM user_commons WHERE commons_id = $1 AND user_id = $2 ORDER BY id LIMIT 1",
            USER_COMMONS_COLUMNS
        );
        let row = sqlx::query_as::<_, UserCommons>(&sql)
            .bind(commons_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, user_commons: UserCommons) -> Result<UserCommons, RepositoryError> {
        let saved = match user_commons.id {
            Some(id) => {
                let sql = format!(
                    "UPDATE user_commons SET \
                        user_id = $2, \
                        commons_id = $3, \
                        total_wealth = $4, \
                        avg_cow_health = $5 \
                     WHERE id = $1 \
                     RETURNING {}",
                    USER_COMMONS_COLUMNS
                );
                sqlx::query_as::<_, UserCommons>(&sql)
                    .bind(id)
                    .bind(user_commons.user_id)
                    .bind(user_commons.commons_id)
                    .bind(user_commons.total_wealth)
                    .bind(user_commons.avg_cow_health)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or(RepositoryError::NotFound { entity: UserCommons::ENTITY, id })?
            }
            None => {
                let sql = format!(
                    "INSERT INTO user_commons (user_id, commons_id, total_wealth, avg_cow_health) \
                     VALUES ($1, $2, $3, $4) RETURNING {}",
                    USER_COMMONS_COLUMNS
                );
                sqlx::query_as::<_, UserCommons>(&sql)
                    .bind(user_commons.user_id)
                    .bind(user_commons.commons_id)
                    .bind(user_commons.total_wealth)
                    .bind(user_commons.avg_cow_health)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(saved)
    }
}
