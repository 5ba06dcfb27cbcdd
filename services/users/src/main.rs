use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{
    database::{DatabaseConfig, health_check, init_pool},
    error::DatabaseError,
};
use tokio::net::TcpListener;
use users::{
    AppState, config::AppConfig, create_router,
    store::{PgUserStore, UserStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("users=info,common=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("Starting users service");

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(DatabaseError::from)?;
    info!("Database migrations applied");

    let store = Arc::new(PgUserStore::new(pool)) as Arc<dyn UserStore>;
    let app = create_router(AppState::new(store, config.clone()));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(%address, "Users service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
