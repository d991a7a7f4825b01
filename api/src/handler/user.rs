use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;

use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::user::{CreateUserRequest, UserResponse, UsersResponse};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let user = registry.user_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn show_user_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    registry
        .user_repository()
        .find_all()
        .await
        .map(UsersResponse::from)
        .map(Json)
}

pub async fn show_user(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    let user = registry
        .user_repository()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("user ({user_id}) was not found")))?;
    Ok(Json(UserResponse::from(user)))
}
