use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub pwd_hash: String,
    #[sqlx(default)]
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(default)]
    pub status: Option<String>,
    /// Comma-joined ids of confirmed friends.
    #[sqlx(default)]
    pub friends_id: Option<String>,
    /// Comma-joined ids of users with a pending request to this user.
    #[sqlx(default)]
    pub friend_request: Option<String>,
}
