use derive_new::new;

use crate::model::id::{ReservationId, RoomId, UserId};
use crate::model::period::Period;

#[derive(Debug, new)]
pub struct CreateReservation {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub period: Period,
}

#[derive(Debug, new)]
pub struct AlterReservation {
    pub reservation_id: ReservationId,
    pub new_period: Period,
    pub requester_id: UserId,
}

#[derive(Debug, new)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub requester_id: UserId,
}
