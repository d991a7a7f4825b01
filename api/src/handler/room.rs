use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;

use kernel::model::id::RoomId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::room::{
    CreateRoomRequest, RoomResponse, RoomsResponse, UpdateRoomRequest, UpdateRoomRequestWithId,
};

pub async fn register_room(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let room = registry.room_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

pub async fn show_room_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_active_room_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_active()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) was not found")))?;
    Ok(Json(RoomResponse::from(room)))
}

pub async fn update_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<Json<RoomResponse>> {
    req.validate(&())?;

    let mut room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) was not found")))?;
    room.apply(UpdateRoomRequestWithId::new(room_id, req).into())?;
    registry.room_repository().save(&room).await?;
    Ok(Json(RoomResponse::from(room)))
}

pub async fn activate_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    set_room_activation(&registry, room_id, true).await
}

pub async fn deactivate_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    set_room_activation(&registry, room_id, false).await
}

async fn set_room_activation(
    registry: &AppRegistry,
    room_id: RoomId,
    active: bool,
) -> AppResult<Json<RoomResponse>> {
    let mut room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) was not found")))?;
    if active {
        room.activate();
    } else {
        room.deactivate();
    }
    registry.room_repository().save(&room).await?;
    Ok(Json(RoomResponse::from(room)))
}
