use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use rand::seq::IndexedRandom;
use tracing::error;

pub const EMPTY_ECHO: &str = "Nothing has echoed here yet.";

pub async fn fetch_all<C: Context>(ctx: &C) -> ServiceResult<Vec<String>> {
    let path = ctx.echoes_path();
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            error!(path = %path.display(), "Failed to read echoes: {e}");
            return Err(AppError::EchoesUnavailable);
        }
    };
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

pub async fn fetch_random<C: Context>(ctx: &C) -> ServiceResult<String> {
    let echoes = fetch_all(ctx).await?;
    let echo = echoes
        .choose(&mut rand::rng())
        .cloned()
        .unwrap_or_else(|| EMPTY_ECHO.to_owned());
    Ok(echo)
}
