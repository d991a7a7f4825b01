use async_trait::async_trait;
use derive_new::new;

use kernel::notification::{NotificationSink, ReservationEvent};
use shared::error::AppResult;

/// Emits reservation events to the application log. Stands in for an
/// outbound channel such as e-mail while keeping the publishing seam in
/// place.
#[derive(new)]
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn publish(&self, event: &ReservationEvent) -> AppResult<()> {
        let notice = event.notice();
        tracing::info!(
            kind = event.kind(),
            reservation_id = %notice.reservation_id,
            room_id = %notice.room_id,
            user_id = %notice.user_id,
            start = %notice.start,
            end = %notice.end,
            "reservation notification"
        );
        Ok(())
    }
}
