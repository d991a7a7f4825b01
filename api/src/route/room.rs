use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::room::{
    activate_room, deactivate_room, register_room, show_active_room_list, show_room,
    show_room_list, update_room,
};

pub fn build_room_routers() -> Router<AppRegistry> {
    let room_routers = Router::new()
        .route("/", post(register_room))
        .route("/", get(show_room_list))
        .route("/active", get(show_active_room_list))
        .route("/:room_id", get(show_room))
        .route("/:room_id", put(update_room))
        .route("/:room_id/activate", put(activate_room))
        .route("/:room_id/deactivate", put(deactivate_room));

    Router::new().nest("/rooms", room_routers)
}
