use kernel::model::{id::RoomId, room::Room};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub location: String,
    pub resources: Vec<String>,
    pub is_active: bool,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(value: RoomRow) -> Result<Self, Self::Error> {
        let RoomRow {
            room_id,
            room_name,
            capacity,
            location,
            resources,
            is_active,
        } = value;
        Room::new(room_id, room_name, capacity, location, resources, is_active)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))
    }
}
