use crate::controller::{echo_controller, health_check_controller, home_controller};
use axum::{
    routing::{get, post},
    Router,
};
use service::{config::ECHO_PATH, AppState};

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home_controller::index))
        .route(ECHO_PATH, post(echo_controller::echo))
        .route("/health", get(health_check_controller::health_check))
        .with_state(app_state)
}
