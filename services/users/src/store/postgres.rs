//! PostgreSQL-backed user store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::{StoreError, StoreResult, UserStore};
use crate::models::{User, UserData};

/// User store over a PostgreSQL pool
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turn a unique-index violation into [`StoreError::DuplicateEmail`]
fn map_write_error(err: sqlx::Error, email: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateEmail(email.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn email_taken(&self, email: &str, except: Option<i64>) -> StoreResult<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn insert(&self, data: UserData) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.email))?;

        info!(user_id = user.id, "Inserted user row");
        Ok(user)
    }

    async fn update(&self, id: i64, data: UserData) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2,
                email = $3,
                password = $4,
                updated_at = GREATEST(NOW(), updated_at)
            WHERE id = $1
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.email))?
        .ok_or(StoreError::NotFound(id))?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    async fn ping(&self) -> bool {
        common::database::health_check(&self.pool)
            .await
            .unwrap_or(false)
    }
}
