use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// One keyed document table per entity, mirroring a browser object store.
const TABLES: &[&str] = &["jobs", "candidates", "assessments", "submissions"];

/// Creates and returns a SQLite connection pool.
///
/// The pool holds exactly one long-lived connection: every connection to
/// `sqlite::memory:` opens its own private database.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening local store at {database_url}");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(database_url)
        .await?;

    migrate(&pool).await?;

    info!("Local store ready");
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<()> {
    for table in TABLES {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY NOT NULL,
                position INTEGER NOT NULL DEFAULT 0,
                data TEXT NOT NULL
            )"
        ))
        .execute(pool)
        .await?;
    }
    Ok(())
}
