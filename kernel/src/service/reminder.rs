use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use derive_new::new;

use crate::model::reservation::{Reservation, ReservationStatus};
use crate::notification::{NotificationSink, ReservationEvent, ReservationNotice};
use crate::repository::reservation::ReservationRepository;
use shared::error::AppResult;

/// One-time reminders for confirmed reservations about to start.
///
/// Each pass selects confirmed, not-yet-reminded reservations starting
/// within `[now + 10min, now + 15min)`, flags them, and emits a reminder
/// event per item. A failing item is logged and skipped; it will be picked
/// up again on the next pass if its flag never got persisted (at-least-once
/// per item).
#[derive(new)]
pub struct ReminderService {
    reservation_repository: Arc<dyn ReservationRepository>,
    notification_sink: Arc<dyn NotificationSink>,
}

impl ReminderService {
    /// Runs a single sweep pass and returns the number of reminders sent.
    pub async fn run_once(&self, now: DateTime<Utc>) -> AppResult<usize> {
        let window_start = now + Duration::minutes(10);
        let window_end = now + Duration::minutes(15);

        let due = self
            .reservation_repository
            .find_due_for_reminder(ReservationStatus::Confirmed, window_start, window_end)
            .await?;

        let mut sent = 0;
        for reservation in due {
            let reservation_id = reservation.id();
            match self.remind(reservation).await {
                Ok(()) => sent += 1,
                Err(e) => tracing::warn!(
                    error.message = %e, reservation_id = %reservation_id,
                    "skipping reservation after failed reminder"
                ),
            }
        }
        Ok(sent)
    }

    async fn remind(&self, mut reservation: Reservation) -> AppResult<()> {
        reservation.mark_reminder_sent()?;
        self.reservation_repository.save(&reservation).await?;

        let event = ReservationEvent::Reminder(ReservationNotice::of(&reservation));
        if let Err(e) = self.notification_sink.publish(&event).await {
            // The flag is already persisted; the reminder is counted as
            // delivered and will not be retried.
            tracing::warn!(
                error.message = %e, reservation_id = %reservation.id(),
                "failed to publish reminder notification"
            );
        }
        Ok(())
    }
}
