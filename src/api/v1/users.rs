use crate::api::{Actor, RequestContext};
use crate::common::avatars;
use crate::common::context::Context;
use crate::common::error::ServiceResponse;
use crate::models::api::{
    ChangeUsernameArgs, CheckUsernameArgs, CredentialsArgs, ProfileResponse, SearchArgs,
};
use crate::models::users::{Identity, SearchOutcome, UsernameAvailability};
use crate::usecases::users;
use axum::Json;
use axum::extract::Query;

pub async fn register(
    ctx: RequestContext,
    Json(args): Json<CredentialsArgs>,
) -> ServiceResponse<Identity> {
    let identity = users::register(&ctx, &args.username, &args.password).await?;
    Ok(Json(identity))
}

pub async fn login(
    ctx: RequestContext,
    Json(args): Json<CredentialsArgs>,
) -> ServiceResponse<Identity> {
    let identity = users::verify_credentials(&ctx, &args.username, &args.password).await?;
    Ok(Json(identity))
}

pub async fn change_username(
    ctx: RequestContext,
    Actor(user): Actor,
    Json(args): Json<ChangeUsernameArgs>,
) -> ServiceResponse<Identity> {
    let identity = users::change_username(&ctx, &user, &args.new_username).await?;
    Ok(Json(identity))
}

pub async fn me(ctx: RequestContext, Actor(user): Actor) -> ServiceResponse<ProfileResponse> {
    let user = users::fetch_one_by_username(&ctx, &user.username).await?;
    let avatar = avatars::find_avatar(ctx.upload_dir(), user.user_id).await;
    Ok(Json(ProfileResponse {
        user_id: user.user_id,
        username: user.username,
        avatar,
        status: user.status,
        created_at: user.created_at,
        friend_count: user.friends.len(),
        pending_request_count: user.friend_requests.len(),
    }))
}

pub async fn search(
    ctx: RequestContext,
    Query(args): Query<SearchArgs>,
) -> ServiceResponse<SearchOutcome> {
    let outcome = users::search(&ctx, &args.query).await?;
    Ok(Json(outcome))
}

pub async fn check_username(
    ctx: RequestContext,
    Query(args): Query<CheckUsernameArgs>,
) -> ServiceResponse<UsernameAvailability> {
    let availability = users::check_username(&ctx, &args.username).await?;
    Ok(Json(availability))
}
