//! User repository for database operations

use std::sync::Arc;
use tracing::{error, info};

use crate::models::{PageRequest, User, UserData, UserFields};
use crate::password::hash_password;
use crate::store::{StoreError, StoreResult, UserStore};

/// Result of [`UserRepository::destroy_item`]
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    Failed { reason: String },
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// One page of users in insertion order; pages past the end are empty
    pub async fn get_items(&self, page: PageRequest) -> StoreResult<Vec<User>> {
        self.store.list(page.limit(), page.offset()).await
    }

    /// Hash the password and persist a new user
    pub async fn store_item(&self, fields: UserFields) -> StoreResult<User> {
        let data = into_data(fields).await?;
        let user = self.store.insert(data).await?;

        info!(user_id = user.id, email = %user.email, "User created");
        Ok(user)
    }

    /// Overwrite name, email and password of `user`, returning the refreshed row
    pub async fn update_item(&self, user: &User, fields: UserFields) -> StoreResult<User> {
        let data = into_data(fields).await?;
        let updated = self.store.update(user.id, data).await?;

        info!(user_id = updated.id, email = %updated.email, "User updated");
        Ok(updated)
    }

    /// Delete `user`; failures are logged and reported in the outcome
    pub async fn destroy_item(&self, user: &User) -> DeleteOutcome {
        match self.store.delete(user.id).await {
            Ok(()) => {
                info!(user_id = user.id, "User deleted");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                let reason = e.to_string();
                error!(user_id = user.id, reason = %reason, "Failed to delete user");
                DeleteOutcome::Failed { reason }
            }
        }
    }

    /// Find a user by ID
    pub async fn find(&self, id: i64) -> StoreResult<Option<User>> {
        self.store.find(id).await
    }

    /// Whether `email` is used by a user other than `except`
    pub async fn email_taken(&self, email: &str, except: Option<i64>) -> StoreResult<bool> {
        self.store.email_taken(email, except).await
    }

    pub async fn health_check(&self) -> bool {
        self.store.ping().await
    }
}

/// Argon2 is CPU-bound, so hashing runs on the blocking pool
async fn into_data(fields: UserFields) -> StoreResult<UserData> {
    let UserFields {
        name,
        email,
        password,
    } = fields;

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| StoreError::Hash(e.to_string()))?
        .map_err(|e| StoreError::Hash(e.to_string()))?;

    Ok(UserData {
        name,
        email,
        password_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::verify_password;
    use crate::store::InMemoryUserStore;
    use async_trait::async_trait;

    fn fields(name: &str, email: &str, password: &str) -> UserFields {
        UserFields {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn repository() -> UserRepository {
        UserRepository::new(Arc::new(InMemoryUserStore::new()))
    }

    #[tokio::test]
    async fn test_store_item_hashes_password() {
        let repo = repository();
        let user = repo
            .store_item(fields("name9", "name9@mail.ru", "11111113"))
            .await
            .unwrap();

        assert_eq!(user.email, "name9@mail.ru");
        assert_ne!(user.password, "11111113");
        assert!(verify_password("11111113", &user.password).unwrap());
    }

    #[tokio::test]
    async fn test_update_item_overwrites_every_field() {
        let repo = repository();
        let user = repo
            .store_item(fields("name9", "name9@mail.ru", "11111113"))
            .await
            .unwrap();

        let updated = repo
            .update_item(&user, fields("name44", "name441@mail.ru", "22222222"))
            .await
            .unwrap();

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.name, "name44");
        assert_eq!(updated.email, "name441@mail.ru");
        assert!(verify_password("22222222", &updated.password).unwrap());
        assert!(updated.updated_at >= user.updated_at);
    }

    #[tokio::test]
    async fn test_get_items_pages() {
        let repo = repository();
        for i in 0..3 {
            repo.store_item(fields(
                &format!("n{}", i),
                &format!("n{}@mail.ru", i),
                "11111111",
            ))
            .await
            .unwrap();
        }

        let first = repo
            .get_items(PageRequest { page: 1, per_page: 2 })
            .await
            .unwrap();
        let second = repo
            .get_items(PageRequest { page: 2, per_page: 2 })
            .await
            .unwrap();
        let beyond = repo
            .get_items(PageRequest { page: 9, per_page: 2 })
            .await
            .unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name, "n2");
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_destroy_item_removes_row() {
        let repo = repository();
        let user = repo
            .store_item(fields("a", "a@mail.ru", "11111111"))
            .await
            .unwrap();

        assert!(repo.destroy_item(&user).await.is_deleted());
        assert!(repo.find(user.id).await.unwrap().is_none());
    }

    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn list(&self, _limit: i64, _offset: i64) -> StoreResult<Vec<User>> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn find(&self, _id: i64) -> StoreResult<Option<User>> {
            Ok(None)
        }
        async fn email_taken(&self, _email: &str, _except: Option<i64>) -> StoreResult<bool> {
            Ok(false)
        }
        async fn insert(&self, _data: UserData) -> StoreResult<User> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn update(&self, id: i64, _data: UserData) -> StoreResult<User> {
            Err(StoreError::NotFound(id))
        }
        async fn delete(&self, _id: i64) -> StoreResult<()> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn ping(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_destroy_item_reports_failure_instead_of_raising() {
        let repo = UserRepository::new(Arc::new(BrokenStore));
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            name: "a".to_string(),
            email: "a@mail.ru".to_string(),
            password: "hash".to_string(),
            created_at: now,
            updated_at: now,
        };

        let outcome = repo.destroy_item(&user).await;

        assert!(!outcome.is_deleted());
        match outcome {
            DeleteOutcome::Failed { reason } => {
                assert_eq!(
                    reason,
                    StoreError::Database(sqlx::Error::PoolTimedOut).to_string()
                )
            }
            DeleteOutcome::Deleted => panic!("expected a failed outcome"),
        }
        assert!(!repo.health_check().await);
    }
}
