use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::model::id::{ReservationId, RoomId, UserId};
use crate::model::period::Period;
use crate::model::reservation::{
    event::{AlterReservation, CancelReservation, CreateReservation},
    is_owner_or_admin, Reservation,
};
use crate::model::room::Room;
use crate::model::user::User;
use crate::notification::{NotificationSink, ReservationEvent, ReservationNotice};
use crate::repository::reservation::ReservationRepository;
use crate::repository::room::RoomRepository;
use crate::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

/// Hands out one async mutex per room so that the conflict check and the
/// following write are atomic with respect to other mutations on the same
/// room. Without this, two concurrent creates could both pass the check and
/// both commit an overlap.
#[derive(Default)]
struct RoomLocks {
    locks: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomLocks {
    async fn lock_for(&self, room_id: RoomId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(room_id).or_default().clone()
    }
}

/// The reservation lifecycle engine: create, alter, cancel, and the guarded
/// read operations. Every mutation resolves the requester through the user
/// repository and checks the stored role; no caller-supplied role flags.
pub struct ReservationService {
    room_repository: Arc<dyn RoomRepository>,
    user_repository: Arc<dyn UserRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    notification_sink: Arc<dyn NotificationSink>,
    room_locks: RoomLocks,
}

impl ReservationService {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        user_repository: Arc<dyn UserRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        notification_sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            room_repository,
            user_repository,
            reservation_repository,
            notification_sink,
            room_locks: RoomLocks::default(),
        }
    }

    pub async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let CreateReservation {
            room_id,
            user_id,
            period,
        } = event;

        let room = self.room_of(room_id).await?;
        self.ensure_room_active(&room)?;
        self.user_of(user_id).await?;

        let lock = self.room_locks.lock_for(room_id).await;
        let _guard = lock.lock().await;
        self.ensure_no_conflict(room_id, &period, None).await?;

        let reservation =
            Reservation::new(ReservationId::new(), room_id, user_id, period, Utc::now());
        self.reservation_repository.create(&reservation).await?;

        self.publish(ReservationEvent::Created(ReservationNotice::of(
            &reservation,
        )))
        .await;
        Ok(reservation)
    }

    pub async fn alter(&self, event: AlterReservation) -> AppResult<Reservation> {
        let AlterReservation {
            reservation_id,
            new_period,
            requester_id,
        } = event;

        let mut reservation = self.reservation_of(reservation_id).await?;
        self.authorize(requester_id, &reservation).await?;
        reservation.ensure_mutable()?;

        let room = self.room_of(reservation.room_id()).await?;
        self.ensure_room_active(&room)?;

        let lock = self.room_locks.lock_for(reservation.room_id()).await;
        let _guard = lock.lock().await;
        self.ensure_no_conflict(reservation.room_id(), &new_period, Some(reservation_id))
            .await?;

        reservation.alter_period(new_period, Utc::now())?;
        self.reservation_repository.save(&reservation).await?;

        self.publish(ReservationEvent::Altered(ReservationNotice::of(
            &reservation,
        )))
        .await;
        Ok(reservation)
    }

    pub async fn cancel(&self, event: CancelReservation) -> AppResult<Reservation> {
        let CancelReservation {
            reservation_id,
            requester_id,
        } = event;

        let mut reservation = self.reservation_of(reservation_id).await?;
        self.authorize(requester_id, &reservation).await?;

        reservation.cancel(Utc::now())?;
        self.reservation_repository.save(&reservation).await?;

        self.publish(ReservationEvent::Cancelled(ReservationNotice::of(
            &reservation,
        )))
        .await;
        Ok(reservation)
    }

    pub async fn get(
        &self,
        reservation_id: ReservationId,
        requester_id: UserId,
    ) -> AppResult<Reservation> {
        let reservation = self.reservation_of(reservation_id).await?;
        self.authorize(requester_id, &reservation).await?;
        Ok(reservation)
    }

    pub async fn list(&self, requester_id: UserId) -> AppResult<Vec<Reservation>> {
        self.ensure_admin(requester_id).await?;
        self.reservation_repository.find_all().await
    }

    pub async fn list_by_room(
        &self,
        room_id: RoomId,
        requester_id: UserId,
    ) -> AppResult<Vec<Reservation>> {
        self.ensure_admin(requester_id).await?;
        self.reservation_repository.find_by_room_id(room_id).await
    }

    pub async fn list_by_user(
        &self,
        user_id: UserId,
        requester_id: UserId,
    ) -> AppResult<Vec<Reservation>> {
        let requester = self.user_of(requester_id).await?;
        if !requester.role().is_admin() && requester.id() != user_id {
            return Err(AppError::PermissionDenied(
                "only admins may list another user's reservations".into(),
            ));
        }
        self.reservation_repository.find_by_user_id(user_id).await
    }

    async fn authorize(&self, requester_id: UserId, reservation: &Reservation) -> AppResult<()> {
        let requester = self.user_of(requester_id).await?;
        if !is_owner_or_admin(&requester, reservation) {
            return Err(AppError::PermissionDenied(
                "requester is neither the reservation owner nor an admin".into(),
            ));
        }
        Ok(())
    }

    async fn ensure_admin(&self, requester_id: UserId) -> AppResult<User> {
        let requester = self.user_of(requester_id).await?;
        if !requester.role().is_admin() {
            return Err(AppError::PermissionDenied(
                "only admins may list reservations".into(),
            ));
        }
        Ok(requester)
    }

    fn ensure_room_active(&self, room: &Room) -> AppResult<()> {
        if !room.is_active() {
            return Err(AppError::UnprocessableEntity(format!(
                "room ({}) is inactive and cannot be reserved",
                room.id()
            )));
        }
        Ok(())
    }

    async fn ensure_no_conflict(
        &self,
        room_id: RoomId,
        period: &Period,
        exclude: Option<ReservationId>,
    ) -> AppResult<()> {
        let conflicts = self
            .reservation_repository
            .find_conflicting(room_id, period, exclude)
            .await?;
        if !conflicts.is_empty() {
            return Err(AppError::ScheduleConflict(format!(
                "room ({room_id}) already has a reservation overlapping the requested period"
            )));
        }
        Ok(())
    }

    async fn room_of(&self, room_id: RoomId) -> AppResult<Room> {
        self.room_repository
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) was not found")))
    }

    async fn user_of(&self, user_id: UserId) -> AppResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("user ({user_id}) was not found")))
    }

    async fn reservation_of(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        self.reservation_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation ({reservation_id}) was not found"))
            })
    }

    async fn publish(&self, event: ReservationEvent) {
        if let Err(e) = self.notification_sink.publish(&event).await {
            tracing::warn!(
                error.message = %e, kind = event.kind(),
                "failed to publish reservation notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::reservation::ReservationStatus;
    use crate::model::role::Role;
    use crate::service::testing::{period, TestBackend};

    fn service(backend: &TestBackend) -> ReservationService {
        ReservationService::new(
            backend.rooms.clone(),
            backend.users.clone(),
            backend.reservations.clone(),
            backend.sink.clone(),
        )
    }

    #[tokio::test]
    async fn create_confirms_and_notifies() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let reservation = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();

        assert_eq!(reservation.status(), ReservationStatus::Confirmed);
        assert!(!reservation.reminder_sent());
        assert!(backend.reservations.get(reservation.id()).is_some());

        let events = backend.sink.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ReservationEvent::Created(_)));
    }

    #[tokio::test]
    async fn create_rejects_overlapping_period() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        svc.create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        let clash = svc
            .create(CreateReservation::new(
                room.id(),
                user.id(),
                Period::new(
                    crate::service::testing::at(9, 30),
                    crate::service::testing::at(10, 30),
                )
                .unwrap(),
            ))
            .await;

        assert!(matches!(clash, Err(AppError::ScheduleConflict(_))));
    }

    #[tokio::test]
    async fn touching_periods_are_both_accepted() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        svc.create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        let next = svc
            .create(CreateReservation::new(room.id(), user.id(), period(10, 11)))
            .await;
        assert!(next.is_ok());
    }

    #[tokio::test]
    async fn cancelled_reservation_does_not_block_the_slot() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let first = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        svc.cancel(CancelReservation::new(first.id(), user.id()))
            .await
            .unwrap();

        let replacement = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        assert_eq!(replacement.status(), ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn create_rejects_inactive_room_and_missing_entities() {
        let backend = TestBackend::new();
        let inactive = backend.room(false);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let res = svc
            .create(CreateReservation::new(inactive.id(), user.id(), period(9, 10)))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        let res = svc
            .create(CreateReservation::new(RoomId::new(), user.id(), period(9, 10)))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let room = backend.room(true);
        let res = svc
            .create(CreateReservation::new(room.id(), UserId::new(), period(9, 10)))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn alter_moves_the_booking_and_notifies() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let reservation = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        let altered = svc
            .alter(AlterReservation::new(
                reservation.id(),
                period(11, 12),
                user.id(),
            ))
            .await
            .unwrap();

        assert_eq!(altered.status(), ReservationStatus::Altered);
        assert_eq!(altered.period(), period(11, 12));
        let events = backend.sink.events();
        assert!(matches!(events.last(), Some(ReservationEvent::Altered(_))));
    }

    #[tokio::test]
    async fn alter_to_same_period_is_allowed_and_touches_updated_at() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let reservation = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        let altered = svc
            .alter(AlterReservation::new(
                reservation.id(),
                period(9, 10),
                user.id(),
            ))
            .await
            .unwrap();

        assert_eq!(altered.status(), ReservationStatus::Altered);
        assert_eq!(altered.period(), reservation.period());
        assert!(altered.updated_at() > reservation.updated_at());
    }

    #[tokio::test]
    async fn alter_into_conflict_leaves_the_booking_untouched() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let first = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        svc.create(CreateReservation::new(room.id(), user.id(), period(11, 12)))
            .await
            .unwrap();

        let res = svc
            .alter(AlterReservation::new(first.id(), period(11, 12), user.id()))
            .await;
        assert!(matches!(res, Err(AppError::ScheduleConflict(_))));

        let stored = backend.reservations.get(first.id()).unwrap();
        assert_eq!(stored.period(), period(9, 10));
        assert_eq!(stored.status(), ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn alter_requires_owner_or_admin() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let owner = backend.user(Role::Common);
        let stranger = backend.user(Role::Common);
        let admin = backend.user(Role::Admin);
        let svc = service(&backend);

        let reservation = svc
            .create(CreateReservation::new(room.id(), owner.id(), period(9, 10)))
            .await
            .unwrap();

        let denied = svc
            .alter(AlterReservation::new(
                reservation.id(),
                period(11, 12),
                stranger.id(),
            ))
            .await;
        assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

        let allowed = svc
            .alter(AlterReservation::new(
                reservation.id(),
                period(11, 12),
                admin.id(),
            ))
            .await;
        assert!(allowed.is_ok());
    }

    #[tokio::test]
    async fn alter_rejects_inactive_room() {
        let backend = TestBackend::new();
        let mut room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let reservation = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();

        room.deactivate();
        backend.rooms.put(room);

        let res = svc
            .alter(AlterReservation::new(
                reservation.id(),
                period(11, 12),
                user.id(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn cancel_respects_the_permission_gate() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let owner = backend.user(Role::Common);
        let stranger = backend.user(Role::Common);
        let admin = backend.user(Role::Admin);
        let svc = service(&backend);

        let first = svc
            .create(CreateReservation::new(room.id(), owner.id(), period(9, 10)))
            .await
            .unwrap();
        let denied = svc
            .cancel(CancelReservation::new(first.id(), stranger.id()))
            .await;
        assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

        let by_owner = svc
            .cancel(CancelReservation::new(first.id(), owner.id()))
            .await
            .unwrap();
        assert_eq!(by_owner.status(), ReservationStatus::Cancelled);

        let second = svc
            .create(CreateReservation::new(room.id(), owner.id(), period(11, 12)))
            .await
            .unwrap();
        let by_admin = svc
            .cancel(CancelReservation::new(second.id(), admin.id()))
            .await
            .unwrap();
        assert_eq!(by_admin.status(), ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancelling_twice_fails_and_state_is_unchanged() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let reservation = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        svc.cancel(CancelReservation::new(reservation.id(), user.id()))
            .await
            .unwrap();

        let again = svc
            .cancel(CancelReservation::new(reservation.id(), user.id()))
            .await;
        assert!(matches!(again, Err(AppError::InvalidState(_))));

        let stored = backend.reservations.get(reservation.id()).unwrap();
        assert_eq!(stored.status(), ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn altering_a_cancelled_reservation_fails_with_invalid_state() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let svc = service(&backend);

        let reservation = svc
            .create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();
        svc.cancel(CancelReservation::new(reservation.id(), user.id()))
            .await
            .unwrap();

        let res = svc
            .alter(AlterReservation::new(
                reservation.id(),
                period(11, 12),
                user.id(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn listing_everything_is_admin_only() {
        let backend = TestBackend::new();
        let room = backend.room(true);
        let user = backend.user(Role::Common);
        let admin = backend.user(Role::Admin);
        let svc = service(&backend);

        svc.create(CreateReservation::new(room.id(), user.id(), period(9, 10)))
            .await
            .unwrap();

        assert!(matches!(
            svc.list(user.id()).await,
            Err(AppError::PermissionDenied(_))
        ));
        assert_eq!(svc.list(admin.id()).await.unwrap().len(), 1);

        // A user may always list their own bookings.
        assert_eq!(
            svc.list_by_user(user.id(), user.id()).await.unwrap().len(),
            1
        );
    }
}
