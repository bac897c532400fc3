use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use coursework_teams_api::api::{router, AppState};
use coursework_teams_api::config::{Config, Storage};
use coursework_teams_api::infrastructure::database;
use coursework_teams_api::infrastructure::repositories::{
    InMemoryStore, PostgresCourseworkRepository, PostgresTeamRepository,
    PostgresWaitlistRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = match config.storage {
        Storage::Postgres => {
            let database_url = config.database_url.as_deref().unwrap_or_default();
            let pool = database::connect(database_url, config.database_max_connections).await?;
            AppState::new(
                Arc::new(PostgresTeamRepository::new(pool.clone())),
                Arc::new(PostgresCourseworkRepository::new(pool.clone())),
                Arc::new(PostgresWaitlistRepository::new(pool)),
                config.jwt_secret.as_str(),
            )
        }
        Storage::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on exit");
            let store = Arc::new(InMemoryStore::new());
            AppState::new(
                store.clone(),
                store.clone(),
                store,
                config.jwt_secret.as_str(),
            )
        }
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
