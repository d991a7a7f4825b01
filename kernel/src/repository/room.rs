use async_trait::async_trait;

use crate::model::id::RoomId;
use crate::model::room::{event::CreateRoom, Room};
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, event: CreateRoom) -> AppResult<Room>;
    async fn save(&self, room: &Room) -> AppResult<()>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    async fn find_active(&self) -> AppResult<Vec<Room>>;
}
