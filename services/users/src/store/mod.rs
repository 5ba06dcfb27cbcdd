//! Persistence backends for the `users` table

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{User, UserData};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

/// Errors raised by a [`UserStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    /// The unique index on `email` rejected the write
    #[error("Email '{0}' is already taken")]
    DuplicateEmail(String),

    /// No row with this identifier
    #[error("User {0} not found")]
    NotFound(i64),

    /// Password hashing failed before the write was attempted
    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage of user rows, ordered by insertion
///
/// Implementations enforce email uniqueness themselves; callers may probe
/// with [`UserStore::email_taken`] first but must still handle
/// [`StoreError::DuplicateEmail`] from writes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Rows ordered by ascending id
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>>;

    async fn find(&self, id: i64) -> StoreResult<Option<User>>;

    /// Whether `email` belongs to any user other than `except`
    async fn email_taken(&self, email: &str, except: Option<i64>) -> StoreResult<bool>;

    async fn insert(&self, data: UserData) -> StoreResult<User>;

    /// Overwrite every column of an existing row and bump `updated_at`
    async fn update(&self, id: i64, data: UserData) -> StoreResult<User>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Whether the backend is reachable
    async fn ping(&self) -> bool;
}
