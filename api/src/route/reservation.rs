use axum::{
    routing::{get, patch, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    alter_reservation_period, cancel_reservation, register_reservation, show_reservation,
    show_reservation_list, show_reservations_by_room, show_reservations_by_user,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(register_reservation))
        .route("/", get(show_reservation_list))
        .route("/:reservation_id", get(show_reservation))
        .route("/:reservation_id/period", patch(alter_reservation_period))
        .route("/:reservation_id/cancel", patch(cancel_reservation))
        .route("/room/:room_id", get(show_reservations_by_room))
        .route("/user/:user_id", get(show_reservations_by_user));

    Router::new().nest("/reservations", reservation_routers)
}
