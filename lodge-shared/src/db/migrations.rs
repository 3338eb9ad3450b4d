/// Database migration runner
///
/// Migrations live in the `migrations/` directory at the workspace root and
/// are embedded into the binary at compile time with `sqlx::migrate!`.
///
/// # Example
///
/// ```no_run
/// use lodge_shared::db::pool::{create_pool, DatabaseConfig};
/// use lodge_shared::db::migrations::{run_migrations, get_migration_status};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: "sqlite://database/lodgeliberia.db".to_string(),
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///
///     let status = get_migration_status(&pool).await?;
///     println!("Applied {} migrations", status.applied_migrations);
///     Ok(())
/// }
/// ```

use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use tracing::{debug, info, warn};

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Number of migrations that have been applied
    pub applied_migrations: usize,

    /// Latest applied migration version (timestamp)
    pub latest_version: Option<i64>,

    /// Whether the embedded migrations have all been applied
    pub is_up_to_date: bool,
}

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply or an already-applied
/// migration was modified after the fact.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Gets the current migration status
///
/// # Errors
///
/// Returns an error if the migrations table cannot be queried
pub async fn get_migration_status(pool: &SqlitePool) -> Result<MigrationStatus, sqlx::Error> {
    debug!("Checking migration status");

    let (table_count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    if table_count == 0 {
        debug!("Migrations table does not exist yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
            is_up_to_date: false,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = 1",
    )
    .fetch_one(pool)
    .await?;

    let embedded = sqlx::migrate!("../migrations").iter().count();

    debug!(
        applied_migrations = count,
        latest_version = ?latest_version,
        embedded_migrations = embedded,
        "Migration status retrieved"
    );

    Ok(MigrationStatus {
        applied_migrations: count as usize,
        latest_version,
        is_up_to_date: count as usize >= embedded,
    })
}

/// Creates the SQLite database file if it doesn't exist
///
/// # Errors
///
/// Returns an error if the file cannot be created (e.g. missing directory
/// or insufficient permissions).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    info!("Checking if database exists");

    if !Sqlite::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Sqlite::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_status_before_and_after_migrations() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

        let before = get_migration_status(&pool).await.unwrap();
        assert_eq!(before.applied_migrations, 0);
        assert!(!before.is_up_to_date);

        run_migrations(&pool).await.unwrap();

        let after = get_migration_status(&pool).await.unwrap();
        assert!(after.applied_migrations > 0);
        assert!(after.latest_version.is_some());
        assert!(after.is_up_to_date);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();

        run_migrations(&pool).await.unwrap();
        let first = get_migration_status(&pool).await.unwrap();

        run_migrations(&pool).await.unwrap();
        let second = get_migration_status(&pool).await.unwrap();

        assert_eq!(first.applied_migrations, second.applied_migrations);
    }
}
