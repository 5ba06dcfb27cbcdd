//! In-memory user store (for development/testing)

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, UserStore};
use crate::models::{User, UserData};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Process-local user store with the same ordering and uniqueness rules as
/// the PostgreSQL table
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        let table = self.table.read().await;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);

        Ok(table.rows.values().skip(skip).take(take).cloned().collect())
    }

    async fn find(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn email_taken(&self, email: &str, except: Option<i64>) -> StoreResult<bool> {
        Ok(self.table.read().await.email_taken(email, except))
    }

    async fn insert(&self, data: UserData) -> StoreResult<User> {
        let mut table = self.table.write().await;
        if table.email_taken(&data.email, None) {
            return Err(StoreError::DuplicateEmail(data.email));
        }

        table.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: table.last_id,
            name: data.name,
            email: data.email,
            password: data.password_hash,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: i64, data: UserData) -> StoreResult<User> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if table.email_taken(&data.email, Some(id)) {
            return Err(StoreError::DuplicateEmail(data.email));
        }

        let user = table.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        user.name = data.name;
        user.email = data.email;
        user.password = data.password_hash;
        user.updated_at = Utc::now().max(user.updated_at);

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> bool {
        true
    }
}
