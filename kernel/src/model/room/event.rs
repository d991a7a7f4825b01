use crate::model::id::RoomId;

pub struct CreateRoom {
    pub name: String,
    pub capacity: i32,
    pub location: String,
    pub resources: Vec<String>,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub resources: Option<Vec<String>>,
}
