use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;

use kernel::model::id::{ReservationId, RoomId, UserId};
use kernel::model::period::Period;
use kernel::model::reservation::event::{AlterReservation, CancelReservation, CreateReservation};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::Requester;
use crate::model::reservation::{
    AlterReservationRequest, CreateReservationRequest, ReservationResponse, ReservationsResponse,
};

pub async fn register_reservation(
    requester: Requester,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    let period = Period::new(req.start, req.end)?;
    let event = CreateReservation::new(req.room_id, requester.0, period);

    let reservation = registry.reservation_service().create(event).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

pub async fn show_reservation_list(
    requester: Requester,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_service()
        .list(requester.0)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservation(
    requester: Requester,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_service()
        .get(reservation_id, requester.0)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn alter_reservation_period(
    requester: Requester,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<AlterReservationRequest>,
) -> AppResult<Json<ReservationResponse>> {
    req.validate(&())?;
    let new_period = Period::new(req.start, req.end)?;
    let event = AlterReservation::new(reservation_id, new_period, requester.0);

    registry
        .reservation_service()
        .alter(event)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn cancel_reservation(
    requester: Requester,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    let event = CancelReservation::new(reservation_id, requester.0);

    registry
        .reservation_service()
        .cancel(event)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn show_reservations_by_room(
    requester: Requester,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_service()
        .list_by_room(room_id, requester.0)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservations_by_user(
    requester: Requester,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .reservation_service()
        .list_by_user(user_id, requester.0)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}
