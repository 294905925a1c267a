use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[derive(Debug)]
pub enum AppError {
    Unexpected,
    Unauthorized,

    EchoesUnavailable,

    RelationshipsNotFound,
    RelationshipsAlreadyFriends,
    RelationshipsRequestAlreadySent,
    RelationshipsNoSuchRequest,
    RelationshipsSelfTarget,

    UsersNotFound,
    UsersInvalidUsername,
    UsersInvalidPassword,
    UsersUsernameTaken,
    UsersUsernameUnchanged,
    UsersInvalidCredentials,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn as_str(&self) -> &str {
        self.code()
    }

    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::Unauthorized => "unauthorized",

            AppError::EchoesUnavailable => "echoes.unavailable",

            AppError::RelationshipsNotFound => "relationships.not_found",
            AppError::RelationshipsAlreadyFriends => "relationships.already_friends",
            AppError::RelationshipsRequestAlreadySent => "relationships.request_already_sent",
            AppError::RelationshipsNoSuchRequest => "relationships.no_such_request",
            AppError::RelationshipsSelfTarget => "relationships.self_target",

            AppError::UsersNotFound => "users.not_found",
            AppError::UsersInvalidUsername => "users.invalid_username",
            AppError::UsersInvalidPassword => "users.invalid_password",
            AppError::UsersUsernameTaken => "users.username_taken",
            AppError::UsersUsernameUnchanged => "users.username_unchanged",
            AppError::UsersInvalidCredentials => "users.invalid_credentials",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::Unauthorized => "Please log in first.",

            AppError::EchoesUnavailable => "The echo hole could not be read.",

            AppError::RelationshipsNotFound => "This user is not in your friend list.",
            AppError::RelationshipsAlreadyFriends => "You are already friends with this user.",
            AppError::RelationshipsRequestAlreadySent => {
                "You have already sent a friend request to this user."
            }
            AppError::RelationshipsNoSuchRequest => {
                "This user has not sent you a friend request."
            }
            AppError::RelationshipsSelfTarget => "You cannot send a friend request to yourself.",

            AppError::UsersNotFound => "This user does not exist.",
            AppError::UsersInvalidUsername => "Usernames must be between 3 and 20 characters.",
            AppError::UsersInvalidPassword => "Passwords must not be empty.",
            AppError::UsersUsernameTaken => "This username is already taken.",
            AppError::UsersUsernameUnchanged => "The new username is the same as the current one.",
            AppError::UsersInvalidCredentials => {
                "You have entered an invalid username or password."
            }
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::RelationshipsSelfTarget
            | AppError::UsersInvalidUsername
            | AppError::UsersInvalidPassword
            | AppError::UsersUsernameUnchanged => StatusCode::BAD_REQUEST,

            AppError::Unauthorized | AppError::UsersInvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }

            AppError::RelationshipsNotFound
            | AppError::RelationshipsNoSuchRequest
            | AppError::UsersNotFound => StatusCode::NOT_FOUND,

            AppError::RelationshipsAlreadyFriends
            | AppError::RelationshipsRequestAlreadySent
            | AppError::UsersUsernameTaken => StatusCode::CONFLICT,

            AppError::Unexpected | AppError::EchoesUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            success: false,
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}
