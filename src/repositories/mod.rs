use sqlx::{Pool, Sqlite, Transaction};

pub mod users;

/// Starts a transaction holding the database write lock from its first
/// statement, so read-then-write sequences never have to upgrade a lock.
pub async fn begin_write(db: &Pool<Sqlite>) -> sqlx::Result<Transaction<'static, Sqlite>> {
    db.begin_with("BEGIN IMMEDIATE").await
}
