use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::id::{ReservationId, RoomId, UserId};
use crate::model::reservation::Reservation;
use shared::error::AppResult;

/// Payload shared by every reservation notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationNotice {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReservationNotice {
    pub fn of(reservation: &Reservation) -> Self {
        Self {
            reservation_id: reservation.id(),
            room_id: reservation.room_id(),
            user_id: reservation.user_id(),
            start: reservation.period().start(),
            end: reservation.period().end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationEvent {
    Created(ReservationNotice),
    Altered(ReservationNotice),
    Cancelled(ReservationNotice),
    Reminder(ReservationNotice),
}

impl ReservationEvent {
    pub fn notice(&self) -> &ReservationNotice {
        match self {
            ReservationEvent::Created(notice)
            | ReservationEvent::Altered(notice)
            | ReservationEvent::Cancelled(notice)
            | ReservationEvent::Reminder(notice) => notice,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReservationEvent::Created(_) => "reservation.created",
            ReservationEvent::Altered(_) => "reservation.altered",
            ReservationEvent::Cancelled(_) => "reservation.cancelled",
            ReservationEvent::Reminder(_) => "reservation.reminder",
        }
    }
}

/// Receives reservation events after the corresponding persistence write.
/// Delivery is best effort; failures are logged by the caller and never
/// retried.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, event: &ReservationEvent) -> AppResult<()>;
}
