#![allow(dead_code)]

use friend_service::common::context::Context;
use friend_service::common::init;
use friend_service::models::users::Identity;
use friend_service::repositories::users::{self, RelationshipColumn};
use friend_service::settings::AppSettings;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::Level;

fn next_scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!(
        "friend-service-test-{}-{}",
        std::process::id(),
        NEXT_SCRATCH_DIR.fetch_add(1, Ordering::Relaxed)
    ))
}

static NEXT_SCRATCH_DIR: AtomicUsize = AtomicUsize::new(0);

pub struct TestContext {
    pub db: Pool<Sqlite>,
    pub scratch_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub echoes_path: PathBuf,
}

impl TestContext {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory database.
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init::initialize_schema(&db).await.unwrap();
        Self::with_db(db, next_scratch_dir())
    }

    /// A database file opened the way the service opens it, with a pool of
    /// `max_connections` connections.
    pub async fn file_backed(max_connections: usize) -> Self {
        let scratch_dir = next_scratch_dir();
        std::fs::create_dir_all(&scratch_dir).unwrap();
        let settings = AppSettings {
            app_component: "api".to_owned(),
            level: Level::INFO,
            app_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            app_port: 0,
            database_url: format!("sqlite:{}", scratch_dir.join("database.db").display()),
            db_max_connections: max_connections,
            db_wait_timeout: Duration::from_secs(30),
            upload_dir: scratch_dir.join("uploads"),
            echoes_path: scratch_dir.join("echohole.txt"),
        };
        let db = init::initialize_db(&settings).await.unwrap();
        init::initialize_schema(&db).await.unwrap();
        Self::with_db(db, scratch_dir)
    }

    fn with_db(db: Pool<Sqlite>, scratch_dir: PathBuf) -> Self {
        Self {
            db,
            upload_dir: scratch_dir.join("uploads"),
            echoes_path: scratch_dir.join("echohole.txt"),
            scratch_dir,
        }
    }

    pub async fn create_user(&self, username: &str) -> Identity {
        let user_id = users::create(&self.db, username, &format!("hash-{username}"))
            .await
            .unwrap();
        Identity {
            user_id,
            username: username.to_owned(),
        }
    }

    pub async fn friends_column(&self, username: &str) -> Option<String> {
        users::fetch_relationship_column(&self.db, username, RelationshipColumn::Friends)
            .await
            .unwrap()
    }

    pub async fn requests_column(&self, username: &str) -> Option<String> {
        users::fetch_relationship_column(&self.db, username, RelationshipColumn::FriendRequests)
            .await
            .unwrap()
    }

    pub async fn set_friends_column(&self, username: &str, raw: &str) {
        users::update_relationship_column(&self.db, username, RelationshipColumn::Friends, raw)
            .await
            .unwrap();
    }

    pub async fn set_requests_column(&self, username: &str, raw: &str) {
        users::update_relationship_column(
            &self.db,
            username,
            RelationshipColumn::FriendRequests,
            raw,
        )
        .await
        .unwrap();
    }

    /// Makes every later write to `username`'s friend list fail.
    pub async fn break_friend_writes(&self, username: &str) {
        let query = format!(
            "CREATE TRIGGER reject_friend_writes BEFORE UPDATE OF friends_id ON users \
             WHEN OLD.username = '{username}' \
             BEGIN SELECT RAISE(ABORT, 'friend list is read-only'); END"
        );
        sqlx::query(&query).execute(&self.db).await.unwrap();
    }
}

impl Context for TestContext {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }

    fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn echoes_path(&self) -> &Path {
        &self.echoes_path
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.scratch_dir);
    }
}
