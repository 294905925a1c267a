use crate::common::state::AppState;
use crate::settings::AppSettings;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    pwd_hash TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    status TEXT,
    friends_id TEXT,
    friend_request TEXT
)"#;

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        // .json()
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .compact()
        .init();
}

pub async fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let db = initialize_db(settings).await?;
    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    Ok(AppState {
        db,
        upload_dir: settings.upload_dir.clone(),
        echoes_path: settings.echoes_path.clone(),
    })
}

pub async fn initialize_db(settings: &AppSettings) -> anyhow::Result<Pool<Sqlite>> {
    // WAL keeps readers off the writer's lock; writers queue on the busy timeout.
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(SQLITE_BUSY_TIMEOUT);
    let db = SqlitePoolOptions::new()
        .acquire_timeout(settings.db_wait_timeout)
        .max_connections(settings.db_max_connections as _)
        .connect_with(options)
        .await?;
    Ok(db)
}

pub async fn initialize_schema(db: &Pool<Sqlite>) -> sqlx::Result<()> {
    sqlx::query(SCHEMA).execute(db).await?;
    Ok(())
}

pub async fn migrate(settings: &AppSettings) -> anyhow::Result<()> {
    let db = initialize_db(settings).await?;
    initialize_schema(&db).await?;
    info!(database_url = %settings.database_url, "Database schema is up to date");
    Ok(())
}
