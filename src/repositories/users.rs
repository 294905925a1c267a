use crate::entities::users::User;
use sqlx::SqliteExecutor;

const TABLE_NAME: &str = "users";
const READ_FIELDS: &str = "id, username, pwd_hash, created_at, status, friends_id, friend_request";

/// The delimited id-list columns of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipColumn {
    Friends,
    FriendRequests,
}

impl RelationshipColumn {
    const fn select_query(self) -> &'static str {
        match self {
            RelationshipColumn::Friends => const_str::concat!(
                "SELECT friends_id FROM ",
                TABLE_NAME,
                " WHERE username = ?"
            ),
            RelationshipColumn::FriendRequests => const_str::concat!(
                "SELECT friend_request FROM ",
                TABLE_NAME,
                " WHERE username = ?"
            ),
        }
    }

    const fn update_query(self) -> &'static str {
        match self {
            RelationshipColumn::Friends => const_str::concat!(
                "UPDATE ",
                TABLE_NAME,
                " SET friends_id = ? WHERE username = ?"
            ),
            RelationshipColumn::FriendRequests => const_str::concat!(
                "UPDATE ",
                TABLE_NAME,
                " SET friend_request = ? WHERE username = ?"
            ),
        }
    }
}

pub async fn fetch_one_by_username<'e, E: SqliteExecutor<'e>>(
    db: E,
    username: &str,
) -> sqlx::Result<User> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM ",
        TABLE_NAME,
        " WHERE username = ?"
    );
    sqlx::query_as(QUERY).bind(username).fetch_one(db).await
}

pub async fn fetch_id<'e, E: SqliteExecutor<'e>>(
    db: E,
    username: &str,
) -> sqlx::Result<Option<i64>> {
    const QUERY: &str = const_str::concat!("SELECT id FROM ", TABLE_NAME, " WHERE username = ?");
    sqlx::query_scalar(QUERY)
        .bind(username)
        .fetch_optional(db)
        .await
}

pub async fn fetch_username<'e, E: SqliteExecutor<'e>>(
    db: E,
    user_id: i64,
) -> sqlx::Result<Option<String>> {
    const QUERY: &str = const_str::concat!("SELECT username FROM ", TABLE_NAME, " WHERE id = ?");
    sqlx::query_scalar(QUERY)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

/// Returns the raw column text. A missing row and a NULL column both yield `None`.
pub async fn fetch_relationship_column<'e, E: SqliteExecutor<'e>>(
    db: E,
    username: &str,
    column: RelationshipColumn,
) -> sqlx::Result<Option<String>> {
    let value: Option<Option<String>> = sqlx::query_scalar(column.select_query())
        .bind(username)
        .fetch_optional(db)
        .await?;
    Ok(value.flatten())
}

/// Returns false if no row matched `username`.
pub async fn update_relationship_column<'e, E: SqliteExecutor<'e>>(
    db: E,
    username: &str,
    column: RelationshipColumn,
    raw: &str,
) -> sqlx::Result<bool> {
    let result = sqlx::query(column.update_query())
        .bind(raw)
        .bind(username)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn fetch_all_usernames<'e, E: SqliteExecutor<'e>>(db: E) -> sqlx::Result<Vec<String>> {
    const QUERY: &str = const_str::concat!("SELECT username FROM ", TABLE_NAME, " ORDER BY id");
    sqlx::query_scalar(QUERY).fetch_all(db).await
}

pub async fn create<'e, E: SqliteExecutor<'e>>(
    db: E,
    username: &str,
    pwd_hash: &str,
) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO ",
        TABLE_NAME,
        " (username, pwd_hash) VALUES (?, ?)"
    );
    let result = sqlx::query(QUERY)
        .bind(username)
        .bind(pwd_hash)
        .execute(db)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Returns false if no row has `user_id`.
pub async fn update_username<'e, E: SqliteExecutor<'e>>(
    db: E,
    user_id: i64,
    username: &str,
) -> sqlx::Result<bool> {
    const QUERY: &str = const_str::concat!("UPDATE ", TABLE_NAME, " SET username = ? WHERE id = ?");
    let result = sqlx::query(QUERY)
        .bind(username)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
