//! In-memory repository doubles for service tests, mirroring the storage
//! contract without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::model::id::{ReservationId, RoomId, UserId};
use crate::model::period::Period;
use crate::model::reservation::{Reservation, ReservationStatus};
use crate::model::role::Role;
use crate::model::room::{event::CreateRoom, Room};
use crate::model::user::{event::CreateUser, User};
use crate::notification::{NotificationSink, ReservationEvent};
use crate::repository::reservation::ReservationRepository;
use crate::repository::room::RoomRepository;
use crate::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(Default)]
pub(crate) struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    pub(crate) fn put(&self, room: Room) {
        self.rooms.lock().unwrap().insert(room.id(), room);
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, event: CreateRoom) -> AppResult<Room> {
        let room = Room::new(
            RoomId::new(),
            event.name,
            event.capacity,
            event.location,
            event.resources,
            true,
        )?;
        self.put(room.clone());
        Ok(room)
    }

    async fn save(&self, room: &Room) -> AppResult<()> {
        let mut rooms = self.rooms.lock().unwrap();
        if !rooms.contains_key(&room.id()) {
            return Err(AppError::EntityNotFound("room not found".into()));
        }
        rooms.insert(room.id(), room.clone());
        Ok(())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        Ok(self.rooms.lock().unwrap().get(&room_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        Ok(self.rooms.lock().unwrap().values().cloned().collect())
    }

    async fn find_active(&self) -> AppResult<Vec<Room>> {
        let mut active: Vec<Room> = self
            .rooms
            .lock()
            .unwrap()
            .values()
            .filter(|room| room.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|room| room.id());
        Ok(active)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub(crate) fn put(&self, user: User) {
        self.users.lock().unwrap().insert(user.id(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user = User::new(UserId::new(), event.name, event.email, event.role)?;
        self.put(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryReservationRepository {
    reservations: Mutex<HashMap<ReservationId, Reservation>>,
}

impl InMemoryReservationRepository {
    pub(crate) fn put(&self, reservation: Reservation) {
        self.reservations
            .lock()
            .unwrap()
            .insert(reservation.id(), reservation);
    }

    pub(crate) fn get(&self, reservation_id: ReservationId) -> Option<Reservation> {
        self.reservations
            .lock()
            .unwrap()
            .get(&reservation_id)
            .cloned()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, reservation: &Reservation) -> AppResult<()> {
        self.put(reservation.clone());
        Ok(())
    }

    async fn save(&self, reservation: &Reservation) -> AppResult<()> {
        let mut reservations = self.reservations.lock().unwrap();
        if !reservations.contains_key(&reservation.id()) {
            return Err(AppError::EntityNotFound("reservation not found".into()));
        }
        reservations.insert(reservation.id(), reservation.clone());
        Ok(())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        Ok(self.get(reservation_id))
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect())
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.room_id() == room_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn find_conflicting(
        &self,
        room_id: RoomId,
        period: &Period,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.room_id() == room_id)
            .filter(|r| !r.is_cancelled())
            .filter(|r| Some(r.id()) != exclude)
            .filter(|r| r.period().overlaps(period))
            .cloned()
            .collect())
    }

    async fn find_due_for_reminder(
        &self,
        status: ReservationStatus,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.status() == status)
            .filter(|r| !r.reminder_sent())
            .filter(|r| r.period().start() >= window_start && r.period().start() < window_end)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<ReservationEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<ReservationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn publish(&self, event: &ReservationEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub(crate) struct TestBackend {
    pub rooms: Arc<InMemoryRoomRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub reservations: Arc<InMemoryReservationRepository>,
    pub sink: Arc<RecordingSink>,
}

impl TestBackend {
    pub(crate) fn new() -> Self {
        Self {
            rooms: Arc::new(InMemoryRoomRepository::default()),
            users: Arc::new(InMemoryUserRepository::default()),
            reservations: Arc::new(InMemoryReservationRepository::default()),
            sink: Arc::new(RecordingSink::default()),
        }
    }

    pub(crate) fn room(&self, active: bool) -> Room {
        let room = Room::new(
            RoomId::new(),
            "Aquario".into(),
            8,
            "2nd floor".into(),
            vec![],
            active,
        )
        .unwrap();
        self.rooms.put(room.clone());
        room
    }

    pub(crate) fn user(&self, role: Role) -> User {
        let user = User::new(UserId::new(), "Ana".into(), "ana@example.com".into(), role).unwrap();
        self.users.put(user.clone());
        user
    }
}

pub(crate) fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
}

pub(crate) fn period(start_hour: u32, end_hour: u32) -> Period {
    Period::new(at(start_hour, 0), at(end_hour, 0)).unwrap()
}
