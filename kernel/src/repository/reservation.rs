use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::id::{ReservationId, RoomId, UserId};
use crate::model::period::Period;
use crate::model::reservation::{Reservation, ReservationStatus};
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: &Reservation) -> AppResult<()>;
    async fn save(&self, reservation: &Reservation) -> AppResult<()>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;
    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Reservation>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>>;
    /// Non-cancelled reservations of the room whose period overlaps the
    /// given one, optionally ignoring a single reservation id so that an
    /// alteration does not collide with itself.
    async fn find_conflicting(
        &self,
        room_id: RoomId,
        period: &Period,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>>;
    /// Reservations with the given status, reminder still pending, starting
    /// within `[window_start, window_end)`.
    async fn find_due_for_reminder(
        &self,
        status: ReservationStatus,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<Vec<Reservation>>;
}
