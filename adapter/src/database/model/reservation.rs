use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    period::Period,
    reservation::{Reservation, ReservationStatus},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            room_id,
            user_id,
            start_at,
            end_at,
            status,
            reminder_sent,
            created_at,
            updated_at,
        } = value;
        let period = Period::new(start_at, end_at)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        let status = status
            .parse::<ReservationStatus>()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Reservation::restore(
            reservation_id,
            room_id,
            user_id,
            period,
            status,
            reminder_sent,
            created_at,
            updated_at,
        ))
    }
}
