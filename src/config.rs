use anyhow::Result;
use sea_orm::Database;

use crate::changes::ChangeFeed;
use crate::schemas::AppState;

/// Loads `.env` into the process environment so that CLI arguments with
/// `env = ...` fallbacks can pick the values up. A missing file is fine.
pub fn load_environment() {
    dotenvy::dotenv().ok();
}

/// Initialize application state against an explicit database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState {
        db,
        changes: ChangeFeed::new(),
        calculator: compute::default_calculator(),
    })
}
