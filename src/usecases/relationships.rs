use crate::common::avatars;
use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::models::relationships::{FriendEntry, FriendList, FriendRequestQueue};
use crate::models::users::Identity;
use crate::repositories;
use crate::repositories::users::{self, RelationshipColumn};
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

async fn fetch_friend_list<C: Context>(ctx: &C, user: &Identity) -> ServiceResult<FriendList> {
    let raw =
        users::fetch_relationship_column(ctx.db(), &user.username, RelationshipColumn::Friends)
            .await?;
    Ok(FriendList::decode(user.user_id, raw.as_deref()))
}

async fn resolve_entries<C: Context>(ctx: &C, user_ids: &[i64]) -> ServiceResult<Vec<FriendEntry>> {
    let mut entries = Vec::with_capacity(user_ids.len());
    for &user_id in user_ids {
        let Some(username) = users::fetch_username(ctx.db(), user_id).await? else {
            debug!(user_id, "Skipping dangling relationship entry");
            continue;
        };
        let avatar = avatars::find_avatar(ctx.upload_dir(), user_id).await;
        entries.push(FriendEntry {
            user_id,
            username,
            avatar,
        });
    }
    Ok(entries)
}

pub async fn fetch_friends<C: Context>(ctx: &C, user: &Identity) -> ServiceResult<Vec<FriendEntry>> {
    let friends = fetch_friend_list(ctx, user).await?;
    resolve_entries(ctx, friends.ids()).await
}

pub async fn fetch_pending_requests<C: Context>(
    ctx: &C,
    user: &Identity,
) -> ServiceResult<Vec<FriendEntry>> {
    let raw = users::fetch_relationship_column(
        ctx.db(),
        &user.username,
        RelationshipColumn::FriendRequests,
    )
    .await?;
    let queue = FriendRequestQueue::decode(raw.as_deref());
    resolve_entries(ctx, queue.ids()).await
}

/// Applies `update` to the friend list stored on `username`'s row.
/// Returns whether the row was rewritten.
async fn update_friend_list(
    conn: &mut SqliteConnection,
    username: &str,
    owner_id: i64,
    update: impl FnOnce(&mut FriendList) -> bool,
) -> sqlx::Result<bool> {
    let raw =
        users::fetch_relationship_column(&mut *conn, username, RelationshipColumn::Friends).await?;
    let mut friends = FriendList::decode(owner_id, raw.as_deref());
    if !update(&mut friends) {
        return Ok(false);
    }
    users::update_relationship_column(
        &mut *conn,
        username,
        RelationshipColumn::Friends,
        &friends.encode(),
    )
    .await
}

/// Best-effort write of the other party's half of a friendship.
async fn update_reverse_friend_list(
    conn: &mut SqliteConnection,
    username: &str,
    owner_id: i64,
    friend_id: i64,
    update: impl FnOnce(&mut FriendList) -> bool,
) {
    if let Err(e) = update_friend_list(conn, username, owner_id, update).await {
        warn!(
            user_id = owner_id,
            friend_id, "Friendship left asymmetric, reverse update failed: {e}"
        );
    }
}

pub async fn remove_friend<C: Context>(
    ctx: &C,
    user: &Identity,
    target_username: &str,
) -> ServiceResult<String> {
    let Some(target_id) = users::fetch_id(ctx.db(), target_username).await? else {
        return Err(AppError::RelationshipsNotFound);
    };

    let mut tx = repositories::begin_write(ctx.db()).await?;
    let removed = update_friend_list(&mut tx, &user.username, user.user_id, |friends| {
        friends.remove(target_id)
    })
    .await?;
    if !removed {
        return Err(AppError::RelationshipsNotFound);
    }
    update_reverse_friend_list(&mut tx, target_username, target_id, user.user_id, |friends| {
        friends.remove(user.user_id)
    })
    .await;
    tx.commit().await?;

    info!(user_id = user.user_id, friend_id = target_id, "Removed friend");
    Ok(format!("{target_username} has been removed from your friends."))
}

pub async fn send_friend_request<C: Context>(
    ctx: &C,
    sender: &Identity,
    target_username: &str,
) -> ServiceResult<String> {
    let Some(target_id) = users::fetch_id(ctx.db(), target_username).await? else {
        return Err(AppError::UsersNotFound);
    };
    if target_id == sender.user_id {
        return Err(AppError::RelationshipsSelfTarget);
    }

    let mut tx = repositories::begin_write(ctx.db()).await?;
    let raw = users::fetch_relationship_column(
        &mut *tx,
        &sender.username,
        RelationshipColumn::Friends,
    )
    .await?;
    if FriendList::decode(sender.user_id, raw.as_deref()).contains(target_id) {
        return Err(AppError::RelationshipsAlreadyFriends);
    }

    let raw = users::fetch_relationship_column(
        &mut *tx,
        target_username,
        RelationshipColumn::FriendRequests,
    )
    .await?;
    let mut queue = FriendRequestQueue::decode(raw.as_deref());
    if !queue.push(sender.user_id) {
        return Err(AppError::RelationshipsRequestAlreadySent);
    }
    users::update_relationship_column(
        &mut *tx,
        target_username,
        RelationshipColumn::FriendRequests,
        &queue.encode(),
    )
    .await?;
    tx.commit().await?;

    info!(user_id = sender.user_id, target_id, "Sent friend request");
    Ok(format!("Friend request sent to {target_username}."))
}

pub async fn accept_friend_request<C: Context>(
    ctx: &C,
    user: &Identity,
    requester_username: &str,
) -> ServiceResult<String> {
    let Some(requester_id) = users::fetch_id(ctx.db(), requester_username).await? else {
        return Err(AppError::RelationshipsNoSuchRequest);
    };

    let mut tx = repositories::begin_write(ctx.db()).await?;
    let raw = users::fetch_relationship_column(
        &mut *tx,
        &user.username,
        RelationshipColumn::FriendRequests,
    )
    .await?;
    let mut queue = FriendRequestQueue::decode(raw.as_deref());
    if !queue.remove(requester_id) {
        return Err(AppError::RelationshipsNoSuchRequest);
    }
    users::update_relationship_column(
        &mut *tx,
        &user.username,
        RelationshipColumn::FriendRequests,
        &queue.encode(),
    )
    .await?;

    update_friend_list(&mut tx, &user.username, user.user_id, |friends| {
        friends.insert(requester_id)
    })
    .await?;
    update_reverse_friend_list(
        &mut tx,
        requester_username,
        requester_id,
        user.user_id,
        |friends| friends.insert(user.user_id),
    )
    .await;
    tx.commit().await?;

    info!(
        user_id = user.user_id,
        friend_id = requester_id,
        "Accepted friend request"
    );
    Ok(format!("You are now friends with {requester_username}!"))
}

/// Declining a request that is not pending still succeeds.
pub async fn decline_friend_request<C: Context>(
    ctx: &C,
    user: &Identity,
    requester_username: &str,
) -> ServiceResult<String> {
    let message = format!("Declined the friend request from {requester_username}.");
    let Some(requester_id) = users::fetch_id(ctx.db(), requester_username).await? else {
        return Ok(message);
    };

    let mut tx = repositories::begin_write(ctx.db()).await?;
    let raw = users::fetch_relationship_column(
        &mut *tx,
        &user.username,
        RelationshipColumn::FriendRequests,
    )
    .await?;
    let mut queue = FriendRequestQueue::decode(raw.as_deref());
    if queue.remove(requester_id) {
        users::update_relationship_column(
            &mut *tx,
            &user.username,
            RelationshipColumn::FriendRequests,
            &queue.encode(),
        )
        .await?;
        info!(user_id = user.user_id, requester_id, "Declined friend request");
    }
    tx.commit().await?;

    Ok(message)
}
