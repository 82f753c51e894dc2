use app_state::DatabaseConstants;
use color_eyre::eyre::Result;
use common_services::database::get_db_pool;
use sqlx::{Executor, PgPool};
use tracing::info;
use url::Url;

/// Recreates `database_name` next to the database in `base_database_url` and returns a migrated
/// pool for it.
pub async fn create_test_database(
    base_database_url: &str,
    database_name: &str,
    db_settings: &DatabaseConstants,
) -> Result<PgPool> {
    // 1. Connect to the default 'postgres' database to manage other databases.
    let mut management_db_url = Url::parse(base_database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = get_db_pool(management_db_url.as_str(), db_settings, false).await?;
    force_drop_db(&management_pool, database_name).await;

    // 2. Create the new test database.
    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;
    management_pool.close().await;

    // 3. Connect to it; get_db_pool runs the migrations.
    let mut test_db_url = Url::parse(base_database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let pool = get_db_pool(test_db_url.as_str(), db_settings, true).await?;
    info!("Created and migrated {}", database_name);

    Ok(pool)
}

/// Drops the database if it exists, disconnecting anyone still using it.
pub async fn force_drop_db(management_pool: &PgPool, database_name: &str) {
    let _ = management_pool
        .execute(format!("DROP DATABASE IF EXISTS \"{database_name}\" WITH (FORCE)").as_str())
        .await;
}
