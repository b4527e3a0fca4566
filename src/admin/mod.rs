pub mod handlers;

use axum::{
    routing::{delete, get, post},
    Router,
};
use crate::http::server::AppState;
use self::handlers::*;

/// Routes for seeding and inspecting the model outside the protocol.
pub fn setup_admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/state", get(get_state))
        .route("/admin/instances", post(create_instance))
        .route("/admin/instances/{id}", delete(remove_instance))
        .route("/admin/load-balancers/{name}", post(create_load_balancer).delete(remove_load_balancer))
}
