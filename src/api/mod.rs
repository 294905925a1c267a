use crate::common::context::Context;
use crate::common::error::AppError;
use crate::common::state::AppState;
use crate::models::users::Identity;
use crate::settings::AppSettings;
use crate::usecases::users;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::get;
use sqlx::{Pool, Sqlite};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod v1;

/// Header carrying the username authenticated by the upstream session layer.
pub const AUTHENTICATED_USER_HEADER: &str = "X-Authenticated-User";

pub struct RequestContext {
    pub db: Pool<Sqlite>,
    pub upload_dir: PathBuf,
    pub echoes_path: PathBuf,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/api/v1", v1::router())
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = crate::common::init::initialize_state(settings).await?;
    let app = router().with_state(state);
    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn index() -> &'static str {
    "Running friend-service v0.1"
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            db: state.db.clone(),
            upload_dir: state.upload_dir.clone(),
            echoes_path: state.echoes_path.clone(),
        })
    }
}

impl Context for RequestContext {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }

    fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn echoes_path(&self) -> &Path {
        &self.echoes_path
    }
}

/// The authenticated caller, resolved from [`AUTHENTICATED_USER_HEADER`].
pub struct Actor(pub Identity);

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(username) = parts.headers.get(AUTHENTICATED_USER_HEADER) else {
            return Err(AppError::Unauthorized);
        };
        let username = username
            .to_str()
            .map_err(|_| AppError::Unauthorized)?
            .to_owned();
        let ctx = RequestContext::from_request_parts(parts, state).await?;
        match users::fetch_identity(&ctx, &username).await {
            Ok(identity) => Ok(Actor(identity)),
            Err(AppError::UsersNotFound) => Err(AppError::Unauthorized),
            Err(e) => Err(e),
        }
    }
}
