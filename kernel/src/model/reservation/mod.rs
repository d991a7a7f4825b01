use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::id::{ReservationId, RoomId, UserId};
use crate::model::period::Period;
use crate::model::user::User;
use shared::error::{AppError, AppResult};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmed,
    Altered,
    Cancelled,
}

/// A time-bounded booking of a room by a user.
///
/// Status lifecycle: `Confirmed` -> `Altered` (any number of times) ->
/// `Cancelled`, which is terminal. The entity only models the state machine;
/// conflict detection and authorization happen in the service layer before
/// any transition is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    id: ReservationId,
    room_id: RoomId,
    user_id: UserId,
    period: Period,
    status: ReservationStatus,
    reminder_sent: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        id: ReservationId,
        room_id: RoomId,
        user_id: UserId,
        period: Period,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            room_id,
            user_id,
            period,
            status: ReservationStatus::Confirmed,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a persisted reservation without running creation defaults.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ReservationId,
        room_id: RoomId,
        user_id: UserId,
        period: Period,
        status: ReservationStatus,
        reminder_sent: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            room_id,
            user_id,
            period,
            status,
            reminder_sent,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ReservationId {
        self.id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn reminder_sent(&self) -> bool {
        self.reminder_sent
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }

    /// Cancelled is terminal; neither alter nor cancel may touch it again.
    pub fn ensure_mutable(&self) -> AppResult<()> {
        if self.is_cancelled() {
            return Err(AppError::InvalidState(format!(
                "reservation ({}) is already cancelled",
                self.id
            )));
        }
        Ok(())
    }

    pub fn alter_period(&mut self, new_period: Period, now: DateTime<Utc>) -> AppResult<()> {
        self.ensure_mutable()?;
        self.period = new_period;
        self.status = ReservationStatus::Altered;
        self.updated_at = now;
        Ok(())
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        self.ensure_mutable()?;
        self.status = ReservationStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    /// Flips the one-shot reminder flag. Only a confirmed, not-yet-reminded
    /// reservation qualifies; the flag is the sweep's dedup mechanism.
    pub fn mark_reminder_sent(&mut self) -> AppResult<()> {
        if self.status != ReservationStatus::Confirmed {
            return Err(AppError::InvalidState(format!(
                "reservation ({}) is not confirmed; no reminder applies",
                self.id
            )));
        }
        if self.reminder_sent {
            return Err(AppError::InvalidState(format!(
                "reservation ({}) was already reminded",
                self.id
            )));
        }
        self.reminder_sent = true;
        Ok(())
    }
}

/// The permission gate for reservation mutations: the requester must be the
/// owning user or an admin.
pub fn is_owner_or_admin(requester: &User, reservation: &Reservation) -> bool {
    requester.role().is_admin() || requester.id() == reservation.user_id
}
