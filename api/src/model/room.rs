use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(length(min = 1))]
    pub location: String,
    #[garde(skip)]
    #[serde(default)]
    pub resources: Vec<String>,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            name,
            capacity,
            location,
            resources,
        } = value;
        Self {
            name,
            capacity,
            location,
            resources,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub capacity: Option<i32>,
    #[garde(inner(length(min = 1)))]
    pub location: Option<String>,
    #[garde(skip)]
    pub resources: Option<Vec<String>>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithId(RoomId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithId> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithId) -> Self {
        let UpdateRoomRequestWithId(
            room_id,
            UpdateRoomRequest {
                name,
                capacity,
                location,
                resources,
            },
        ) = value;
        Self {
            room_id,
            name,
            capacity,
            location,
            resources,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub location: String,
    pub resources: Vec<String>,
    pub is_active: bool,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        Self {
            room_id: value.id(),
            name: value.name().to_string(),
            capacity: value.capacity(),
            location: value.location().to_string(),
            resources: value.resources(),
            is_active: value.is_active(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}
