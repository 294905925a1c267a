use crate::api::{Actor, RequestContext};
use crate::common::error::ServiceResponse;
use crate::models::api::{ActionResponse, SendFriendRequestArgs};
use crate::models::relationships::FriendEntry;
use crate::usecases::relationships;
use axum::Json;
use axum::extract::Path;

pub async fn list_friends(
    ctx: RequestContext,
    Actor(user): Actor,
) -> ServiceResponse<Vec<FriendEntry>> {
    let friends = relationships::fetch_friends(&ctx, &user).await?;
    Ok(Json(friends))
}

pub async fn list_pending_requests(
    ctx: RequestContext,
    Actor(user): Actor,
) -> ServiceResponse<Vec<FriendEntry>> {
    let requests = relationships::fetch_pending_requests(&ctx, &user).await?;
    Ok(Json(requests))
}

pub async fn remove_friend(
    ctx: RequestContext,
    Actor(user): Actor,
    Path(username): Path<String>,
) -> ServiceResponse<ActionResponse> {
    let message = relationships::remove_friend(&ctx, &user, &username).await?;
    Ok(Json(ActionResponse::ok(message)))
}

pub async fn send_friend_request(
    ctx: RequestContext,
    Actor(user): Actor,
    Json(args): Json<SendFriendRequestArgs>,
) -> ServiceResponse<ActionResponse> {
    let message = relationships::send_friend_request(&ctx, &user, &args.username).await?;
    Ok(Json(ActionResponse::ok(message)))
}

pub async fn accept_friend_request(
    ctx: RequestContext,
    Actor(user): Actor,
    Path(username): Path<String>,
) -> ServiceResponse<ActionResponse> {
    let message = relationships::accept_friend_request(&ctx, &user, &username).await?;
    Ok(Json(ActionResponse::ok(message)))
}

pub async fn decline_friend_request(
    ctx: RequestContext,
    Actor(user): Actor,
    Path(username): Path<String>,
) -> ServiceResponse<ActionResponse> {
    let message = relationships::decline_friend_request(&ctx, &user, &username).await?;
    Ok(Json(ActionResponse::ok(message)))
}
