use crate::dtos::{CreateGenityRequest, GenityResponse, UpdateGenityRequest};
use crate::middleware::AuthUser;
use crate::startup::AppState;
use crate::utils::JsonBody;
use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use service_core::utils::{PageParams, Pages};

pub async fn get_genity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let genity = state.genitys.get(&id).await?;

    Ok(Json(GenityResponse::from(genity)))
}

pub async fn query_genitys(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    // unreadable paging parameters fall back to the defaults
    let params = params
        .map(|Query(params)| params)
        .unwrap_or_else(|e| {
            tracing::info!(error = %e, "Malformed query string");
            PageParams::default()
        });

    let count = state.genitys.count().await?;
    let pages = Pages::from_params(&params, count);

    let items: Vec<GenityResponse> = state
        .genitys
        .query(pages.offset(), pages.limit())
        .await?
        .into_iter()
        .map(GenityResponse::from)
        .collect();

    let mut headers = HeaderMap::new();
    if let Some(link) = pages
        .link_header(uri.path())
        .and_then(|link| HeaderValue::from_str(&link).ok())
    {
        headers.insert(header::LINK, link);
    }

    Ok((headers, Json(pages.with_items(items))))
}

pub async fn create_genity(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(request): JsonBody<CreateGenityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let genity = state.genitys.create(request).await?;

    tracing::info!(genity_id = %genity.id, principal = %claims.sub, "Genity created via API");

    Ok((StatusCode::CREATED, Json(GenityResponse::from(genity))))
}

pub async fn update_genity(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateGenityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let genity = state.genitys.update(&id, request).await?;

    tracing::info!(genity_id = %genity.id, principal = %claims.sub, "Genity updated via API");

    Ok(Json(GenityResponse::from(genity)))
}

pub async fn delete_genity(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let genity = state.genitys.delete(&id).await?;

    tracing::info!(genity_id = %genity.id, principal = %claims.sub, "Genity deleted via API");

    Ok(Json(GenityResponse::from(genity)))
}
