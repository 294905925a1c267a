use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::api::EchoResponse;
use crate::usecases::echoes;
use axum::Json;

pub async fn all(ctx: RequestContext) -> ServiceResponse<Vec<String>> {
    let echoes = echoes::fetch_all(&ctx).await?;
    Ok(Json(echoes))
}

pub async fn random(ctx: RequestContext) -> ServiceResponse<EchoResponse> {
    let echo = echoes::fetch_random(&ctx).await?;
    Ok(Json(EchoResponse { echo }))
}
