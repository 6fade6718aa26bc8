use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT NOT NULL UNIQUE,
        email    TEXT NOT NULL UNIQUE,
        phone    TEXT NOT NULL,
        password TEXT NOT NULL
    )
"#;

/// Creates a SQLite connection pool and ensures the `users` table exists.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Connecting to SQLite...");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    ensure_schema(&pool).await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    Ok(())
}

/// Single-connection in-memory pool; the database lives as long as the pool.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
