pub mod echoes;
pub mod friends;
pub mod users;

use crate::common::state::AppState;
use axum::Router;
use axum::routing::{delete, get, post};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/friends", get(friends::list_friends))
        .route("/friends/{username}", delete(friends::remove_friend))
        .route(
            "/friends/requests",
            get(friends::list_pending_requests).post(friends::send_friend_request),
        )
        .route(
            "/friends/requests/{username}/accept",
            post(friends::accept_friend_request),
        )
        .route(
            "/friends/requests/{username}/decline",
            post(friends::decline_friend_request),
        )
        .route("/users", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::me))
        .route("/users/me/username", post(users::change_username))
        .route("/users/search", get(users::search))
        .route("/users/check", get(users::check_username))
        .route("/echoes", get(echoes::all))
        .route("/echoes/random", get(echoes::random))
}
