use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{Reservation, ReservationStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub start: DateTime<Utc>,
    #[garde(skip)]
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlterReservationRequest {
    #[garde(skip)]
    pub start: DateTime<Utc>,
    #[garde(skip)]
    pub end: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: ReservationStatus,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        Self {
            reservation_id: value.id(),
            room_id: value.room_id(),
            user_id: value.user_id(),
            start: value.period().start(),
            end: value.period().end(),
            status: value.status(),
            reminder_sent: value.reminder_sent(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}
