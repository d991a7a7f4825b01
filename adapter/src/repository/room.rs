use async_trait::async_trait;
use derive_new::new;

use kernel::model::id::RoomId;
use kernel::model::room::{event::CreateRoom, Room};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::room::RoomRow, ConnectionPool};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<Room> {
        // New catalog entries start active.
        let room = Room::new(
            RoomId::new(),
            event.name,
            event.capacity,
            event.location,
            event.resources,
            true,
        )?;

        let res = sqlx::query(
            r#"
            INSERT INTO rooms (room_id, room_name, capacity, location, resources, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(room.id())
        .bind(room.name())
        .bind(room.capacity())
        .bind(room.location())
        .bind(room.resources())
        .bind(room.is_active())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no room record has been created".into(),
            ));
        }

        Ok(room)
    }

    async fn save(&self, room: &Room) -> AppResult<()> {
        let res = sqlx::query(
            r#"
            UPDATE rooms
            SET room_name = $2, capacity = $3, location = $4, resources = $5, is_active = $6
            WHERE room_id = $1
            "#,
        )
        .bind(room.id())
        .bind(room.name())
        .bind(room.capacity())
        .bind(room.location())
        .bind(room.resources())
        .bind(room.is_active())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "room ({}) was not found",
                room.id()
            )));
        }

        Ok(())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT room_id, room_name, capacity, location, resources, is_active
            FROM rooms
            WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Room::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT room_id, room_name, capacity, location, resources, is_active
            FROM rooms
            ORDER BY room_name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Room::try_from).collect()
    }

    async fn find_active(&self) -> AppResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT room_id, room_name, capacity, location, resources, is_active
            FROM rooms
            WHERE is_active = TRUE
            ORDER BY room_name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Room::try_from).collect()
    }
}
