//! HTTP handlers for the user resource

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    extract::ResolvedUser,
    models::{Envelope, ListQuery, PageRequest, UserPayload, UserResponse},
    state::AppState,
    validation,
};

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.user_repository.health_check().await {
        (
            StatusCode::OK,
            Json(json!({ "status": "ok", "service": "users" })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "service": "users" })),
        )
    }
}

/// `GET /user`
pub async fn index(
    State(state): State<AppState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, ApiError>,
) -> ApiResult<Json<Envelope<Vec<UserResponse>>>> {
    let query = ListQuery::from_pairs(pairs);
    let page = PageRequest::from_query(&query, state.config.pagination_count);
    let users = state.user_repository.get_items(page).await?;

    Ok(Json(Envelope::success(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// `POST /user`
pub async fn store(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<UserPayload>, ApiError>,
) -> ApiResult<(StatusCode, Json<Envelope<UserResponse>>)> {
    let fields = validation::validate_create(payload, &state.user_repository).await?;
    let user = state.user_repository.store_item(fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(UserResponse::from(user))),
    ))
}

/// `GET /user/{id}`
pub async fn show(ResolvedUser(user): ResolvedUser) -> Json<Envelope<UserResponse>> {
    Json(Envelope::success(UserResponse::from(user)))
}

/// `PUT|PATCH /user/{id}`
pub async fn update(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
    WithRejection(Json(payload), _): WithRejection<Json<UserPayload>, ApiError>,
) -> ApiResult<Json<Envelope<UserResponse>>> {
    let fields = validation::validate_update(payload, &state.user_repository, user.id).await?;
    let updated = state.user_repository.update_item(&user, fields).await?;

    Ok(Json(Envelope::success(UserResponse::from(updated))))
}

/// `DELETE /user/{id}`
pub async fn destroy(
    State(state): State<AppState>,
    ResolvedUser(user): ResolvedUser,
) -> Json<Envelope<()>> {
    let outcome = state.user_repository.destroy_item(&user).await;

    Json(Envelope::status(outcome.is_deleted()))
}
