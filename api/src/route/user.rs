use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{register_user, show_user, show_user_list};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/", post(register_user))
        .route("/", get(show_user_list))
        .route("/:user_id", get(show_user));

    Router::new().nest("/users", user_routers)
}
