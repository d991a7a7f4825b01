use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;

use kernel::model::id::{ReservationId, RoomId, UserId};
use kernel::model::period::Period;
use kernel::model::reservation::{Reservation, ReservationStatus};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::reservation::ReservationRow, ConnectionPool};

const SELECT_RESERVATION: &str = r#"
    SELECT reservation_id, room_id, user_id, start_at, end_at,
           status, reminder_sent, created_at, updated_at
    FROM reservations
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, reservation: &Reservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            INSERT INTO reservations
            (reservation_id, room_id, user_id, start_at, end_at,
             status, reminder_sent, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reservation.id())
        .bind(reservation.room_id())
        .bind(reservation.user_id())
        .bind(reservation.period().start())
        .bind(reservation.period().end())
        .bind(reservation.status().to_string())
        .bind(reservation.reminder_sent())
        .bind(reservation.created_at())
        .bind(reservation.updated_at())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no reservation record has been created".into(),
            ));
        }

        Ok(())
    }

    async fn save(&self, reservation: &Reservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE reservations
            SET start_at = $2, end_at = $3, status = $4,
                reminder_sent = $5, updated_at = $6
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation.id())
        .bind(reservation.period().start())
        .bind(reservation.period().end())
        .bind(reservation.status().to_string())
        .bind(reservation.reminder_sent())
        .bind(reservation.updated_at())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({}) was not found",
                reservation.id()
            )));
        }

        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE reservation_id = $1"
        ))
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} ORDER BY start_at ASC"
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE room_id = $1 ORDER BY start_at ASC"
        ))
        .bind(room_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE user_id = $1 ORDER BY start_at ASC"
        ))
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    // Overlap on half-open periods: existing.start < new.end AND
    // new.start < existing.end. Cancelled rows never block a slot.
    async fn find_conflicting(
        &self,
        room_id: RoomId,
        period: &Period,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>> {
        let rows = match exclude {
            Some(reservation_id) => {
                sqlx::query_as::<_, ReservationRow>(&format!(
                    r#"{SELECT_RESERVATION}
                    WHERE room_id = $1
                      AND status <> 'CANCELLED'
                      AND start_at < $3
                      AND $2 < end_at
                      AND reservation_id <> $4
                    "#
                ))
                .bind(room_id)
                .bind(period.start())
                .bind(period.end())
                .bind(reservation_id)
                .fetch_all(self.db.inner_ref())
                .await
            }
            None => {
                sqlx::query_as::<_, ReservationRow>(&format!(
                    r#"{SELECT_RESERVATION}
                    WHERE room_id = $1
                      AND status <> 'CANCELLED'
                      AND start_at < $3
                      AND $2 < end_at
                    "#
                ))
                .bind(room_id)
                .bind(period.start())
                .bind(period.end())
                .fetch_all(self.db.inner_ref())
                .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_due_for_reminder(
        &self,
        status: ReservationStatus,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"{SELECT_RESERVATION}
            WHERE status = $1
              AND reminder_sent = FALSE
              AND start_at >= $2
              AND start_at < $3
            ORDER BY start_at ASC
            "#
        ))
        .bind(status.to_string())
        .bind(window_start)
        .bind(window_end)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }
}
