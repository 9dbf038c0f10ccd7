use crate::application::library;
use crate::domain::MemberId;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;

use super::AppState;
use crate::api::{
    error::ApiError,
    extract::{JsonBody, PathParam},
    types::{MemberRequest, MemberResponse},
};

/// GET /members - 全会員を取得
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = library::list_members(&state.service_deps).await?;
    tracing::info!("Returning {} members", members.len());

    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// GET /members/:id - 会員をIDで取得
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = library::get_member(&state.service_deps, MemberId::from_i64(id)).await?;
    tracing::info!("Returning member {:?}", member);

    Ok(Json(MemberResponse::from(member)))
}

/// POST /members - 会員をまとめて登録
///
/// 登録後の会員数を返す。
pub async fn add_members(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<Vec<MemberRequest>>,
) -> Result<(StatusCode, Json<usize>), ApiError> {
    let members = req.into_iter().map(MemberRequest::to_new_member).collect();

    let total = library::add_members(&state.service_deps, members).await?;
    tracing::info!("Members have been added, {} registered", total);

    Ok((StatusCode::CREATED, Json(total)))
}

/// PUT /members/:id - 会員を更新
pub async fn update_member(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<MemberRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member =
        library::update_member(&state.service_deps, MemberId::from_i64(id), req.to_new_member())
            .await?;
    tracing::info!("Member has been updated {:?}", member);

    Ok(Json(MemberResponse::from(member)))
}

/// DELETE /members/:id - 会員を削除
pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    library::delete_member(&state.service_deps, MemberId::from_i64(id)).await?;
    tracing::info!("Member {} has been deleted", id);

    Ok(StatusCode::NO_CONTENT)
}
