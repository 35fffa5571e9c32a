use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, info, instrument};

/// Creates or upgrades the ledger schema at the given database URL.
#[instrument]
pub async fn init_database(database_url: &str) -> Result<()> {
    info!("Preparing ledger schema");

    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("connecting to {database_url}"))?;

    let pending = Migrator::get_pending_migrations(&db).await?;
    if pending.is_empty() {
        info!("Schema already up to date");
        return Ok(());
    }

    debug!("{} migrations to apply", pending.len());
    Migrator::up(&db, None)
        .await
        .context("applying migrations")?;
    info!("Schema ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_database_applies_schema() {
        init_database("sqlite::memory:").await.unwrap();
    }

    #[tokio::test]
    async fn test_init_database_bad_url_fails() {
        assert!(init_database("garbage://nowhere").await.is_err());
    }
}
