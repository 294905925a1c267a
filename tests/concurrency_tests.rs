mod common;

use common::TestContext;
use friend_service::models::users::Identity;
use friend_service::usecases::relationships;
use std::sync::Arc;
use tokio::task::JoinSet;

const USER_COUNT: usize = 40;
const POOL_SIZE: usize = 10;

async fn create_users(ctx: &TestContext, prefix: &str, count: usize) -> Vec<Identity> {
    let mut users = Vec::with_capacity(count);
    for i in 0..count {
        users.push(ctx.create_user(&format!("{prefix}{i}")).await);
    }
    users
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_all_land() {
    let ctx = Arc::new(TestContext::file_backed(POOL_SIZE).await);
    let users = create_users(&ctx, "user", USER_COUNT).await;

    let mut tasks = JoinSet::new();
    for (i, sender) in users.iter().cloned().enumerate() {
        let ctx = Arc::clone(&ctx);
        let target = users[(i + 1) % USER_COUNT].username.clone();
        tasks.spawn(async move {
            relationships::send_friend_request(ctx.as_ref(), &sender, &target).await
        });
    }
    let failures = tasks
        .join_all()
        .await
        .into_iter()
        .filter(Result::is_err)
        .count();
    assert_eq!(failures, 0);

    for (i, user) in users.iter().enumerate() {
        let sender = &users[(i + USER_COUNT - 1) % USER_COUNT];
        let pending = relationships::fetch_pending_requests(ctx.as_ref(), user)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1, "queue of {}", user.username);
        assert_eq!(pending[0].user_id, sender.user_id);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_accepts_keep_every_friend() {
    let ctx = Arc::new(TestContext::file_backed(POOL_SIZE).await);
    let hub = ctx.create_user("hub").await;
    let senders = create_users(&ctx, "fan", USER_COUNT).await;
    for sender in &senders {
        relationships::send_friend_request(ctx.as_ref(), sender, "hub")
            .await
            .unwrap();
    }

    let mut tasks = JoinSet::new();
    for sender in &senders {
        let ctx = Arc::clone(&ctx);
        let hub = hub.clone();
        let requester = sender.username.clone();
        tasks.spawn(async move {
            relationships::accept_friend_request(ctx.as_ref(), &hub, &requester).await
        });
    }
    let failures = tasks
        .join_all()
        .await
        .into_iter()
        .filter(Result::is_err)
        .count();
    assert_eq!(failures, 0);

    let mut friend_ids: Vec<i64> = relationships::fetch_friends(ctx.as_ref(), &hub)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.user_id)
        .collect();
    friend_ids.sort_unstable();
    let expected: Vec<i64> = senders.iter().map(|sender| sender.user_id).collect();
    assert_eq!(friend_ids, expected);
    assert!(
        relationships::fetch_pending_requests(ctx.as_ref(), &hub)
            .await
            .unwrap()
            .is_empty()
    );

    for sender in &senders {
        let friends = relationships::fetch_friends(ctx.as_ref(), sender)
            .await
            .unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].user_id, hub.user_id);
    }
}
