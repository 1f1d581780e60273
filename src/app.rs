use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/drinks", post(handlers::log_drink_form))
        .route("/drinks/:id/delete", post(handlers::delete_drink_form))
        .route("/api/drinks", get(handlers::get_history).post(handlers::log_drink))
        .route("/api/drinks/:id", delete(handlers::delete_drink))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/years", get(handlers::get_years))
        .route("/api/suggestions", get(handlers::get_suggestions))
        .with_state(state)
}
