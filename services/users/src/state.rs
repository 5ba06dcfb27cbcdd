//! Application state shared across handlers

use std::sync::Arc;

use crate::{config::AppConfig, repositories::UserRepository, store::UserStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        Self {
            user_repository: UserRepository::new(store),
            config: Arc::new(config),
        }
    }
}
