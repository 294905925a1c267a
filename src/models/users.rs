use crate::entities::users::User as UserEntity;
use crate::models::relationships::{FriendList, FriendRequestQueue};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 20;

/// The authenticated user an operation acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub friends: FriendList,
    pub friend_requests: FriendRequestQueue,
}

impl User {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.username.clone(),
        }
    }
}

impl From<UserEntity> for User {
    fn from(value: UserEntity) -> Self {
        Self {
            user_id: value.id,
            friends: FriendList::decode(value.id, value.friends_id.as_deref()),
            friend_requests: FriendRequestQueue::decode(value.friend_request.as_deref()),
            username: value.username,
            created_at: value.created_at.map(|created_at| created_at.and_utc()),
            status: value.status,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "users", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The query was empty or only whitespace.
    NoInput,
    NoResults,
    Found(Vec<String>),
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct UsernameAvailability {
    pub available: bool,
    pub message: &'static str,
}

impl UsernameAvailability {
    pub const fn available() -> Self {
        Self {
            available: true,
            message: "This username is available.",
        }
    }

    pub const fn unavailable(message: &'static str) -> Self {
        Self {
            available: false,
            message,
        }
    }
}

pub fn is_valid_username_length(username: &str) -> bool {
    let length = username.chars().count();
    (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_length_bounds_are_inclusive() {
        assert!(!is_valid_username_length("ab"));
        assert!(is_valid_username_length("abc"));
        assert!(is_valid_username_length(&"a".repeat(20)));
        assert!(!is_valid_username_length(&"a".repeat(21)));
    }

    #[test]
    fn username_length_counts_characters() {
        assert!(is_valid_username_length("小明明"));
    }

    #[test]
    fn search_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(SearchOutcome::NoInput).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "no_input" }));

        let json = serde_json::to_value(SearchOutcome::Found(vec!["alice".into()])).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "found", "users": ["alice"] }));
    }

    #[test]
    fn entity_columns_decode_into_relationship_models() {
        let entity = UserEntity {
            id: 1,
            username: "alice".into(),
            pwd_hash: "hash".into(),
            created_at: None,
            status: None,
            friends_id: Some("2,3".into()),
            friend_request: None,
        };
        let user = User::from(entity);
        assert_eq!(user.friends.ids(), &[2, 3]);
        assert!(user.friend_requests.is_empty());
        assert_eq!(user.identity().username, "alice");
    }
}
