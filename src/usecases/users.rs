use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::users::{
    Identity, SearchOutcome, User, UsernameAvailability, is_valid_username_length,
};
use crate::repositories::users;
use tracing::info;

pub async fn fetch_one_by_username<C: Context>(ctx: &C, username: &str) -> ServiceResult<User> {
    match users::fetch_one_by_username(ctx.db(), username).await {
        Ok(user) => Ok(User::from(user)),
        Err(sqlx::Error::RowNotFound) => Err(AppError::UsersNotFound),
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_identity<C: Context>(ctx: &C, username: &str) -> ServiceResult<Identity> {
    match users::fetch_id(ctx.db(), username).await? {
        Some(user_id) => Ok(Identity {
            user_id,
            username: username.to_owned(),
        }),
        None => Err(AppError::UsersNotFound),
    }
}

/// Case-sensitive substring search over every username, in id order.
pub async fn search<C: Context>(ctx: &C, query: &str) -> ServiceResult<SearchOutcome> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchOutcome::NoInput);
    }
    let usernames: Vec<String> = users::fetch_all_usernames(ctx.db())
        .await?
        .into_iter()
        .filter(|username| username.contains(query))
        .collect();
    if usernames.is_empty() {
        Ok(SearchOutcome::NoResults)
    } else {
        Ok(SearchOutcome::Found(usernames))
    }
}

pub async fn check_username<C: Context>(
    ctx: &C,
    username: &str,
) -> ServiceResult<UsernameAvailability> {
    let username = username.trim();
    if username.is_empty() {
        return Ok(UsernameAvailability::unavailable("Usernames must not be empty."));
    }
    if !is_valid_username_length(username) {
        return Ok(UsernameAvailability::unavailable(
            AppError::UsersInvalidUsername.message(),
        ));
    }
    match users::fetch_id(ctx.db(), username).await? {
        Some(_) => Ok(UsernameAvailability::unavailable(
            AppError::UsersUsernameTaken.message(),
        )),
        None => Ok(UsernameAvailability::available()),
    }
}

pub async fn register<C: Context>(
    ctx: &C,
    username: &str,
    password: &str,
) -> ServiceResult<Identity> {
    let username = username.trim();
    if !is_valid_username_length(username) {
        return Err(AppError::UsersInvalidUsername);
    }
    if password.is_empty() {
        return Err(AppError::UsersInvalidPassword);
    }
    if users::fetch_id(ctx.db(), username).await?.is_some() {
        return Err(AppError::UsersUsernameTaken);
    }

    let pwd_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    let user_id = match users::create(ctx.db(), username, &pwd_hash).await {
        Ok(user_id) => user_id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::UsersUsernameTaken);
        }
        Err(e) => return unexpected(e),
    };

    info!(user_id, username, "Registered user");
    Ok(Identity {
        user_id,
        username: username.to_owned(),
    })
}

pub async fn verify_credentials<C: Context>(
    ctx: &C,
    username: &str,
    password: &str,
) -> ServiceResult<Identity> {
    let user = match users::fetch_one_by_username(ctx.db(), username).await {
        Ok(user) => user,
        Err(sqlx::Error::RowNotFound) => return Err(AppError::UsersInvalidCredentials),
        Err(e) => return unexpected(e),
    };
    if !bcrypt::verify(password, &user.pwd_hash)? {
        return Err(AppError::UsersInvalidCredentials);
    }
    Ok(Identity {
        user_id: user.id,
        username: user.username,
    })
}

/// Renames `user` in place. Relationship columns store ids, so friendships
/// and pending requests follow the new name.
pub async fn change_username<C: Context>(
    ctx: &C,
    user: &Identity,
    new_username: &str,
) -> ServiceResult<Identity> {
    let new_username = new_username.trim();
    if !is_valid_username_length(new_username) {
        return Err(AppError::UsersInvalidUsername);
    }
    if new_username == user.username {
        return Err(AppError::UsersUsernameUnchanged);
    }
    if users::fetch_id(ctx.db(), new_username).await?.is_some() {
        return Err(AppError::UsersUsernameTaken);
    }

    match users::update_username(ctx.db(), user.user_id, new_username).await {
        Ok(true) => {}
        Ok(false) => return Err(AppError::UsersNotFound),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::UsersUsernameTaken);
        }
        Err(e) => return unexpected(e),
    }

    info!(
        user_id = user.user_id,
        old_username = user.username.as_str(),
        new_username,
        "Changed username"
    );
    Ok(Identity {
        user_id: user.user_id,
        username: new_username.to_owned(),
    })
}
