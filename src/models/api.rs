use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SendFriendRequestArgs {
    pub username: String,
}

#[derive(Deserialize)]
pub struct SearchArgs {
    #[serde(rename = "q", default)]
    pub query: String,
}

#[derive(Deserialize)]
pub struct CheckUsernameArgs {
    #[serde(default)]
    pub username: String,
}

#[derive(Deserialize)]
pub struct CredentialsArgs {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangeUsernameArgs {
    pub new_username: String,
}

/// Body of every mutating friend operation that succeeded.
#[derive(Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

#[derive(Serialize)]
pub struct EchoResponse {
    pub echo: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub username: String,
    pub avatar: String,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub friend_count: usize,
    pub pending_request_count: usize,
}
