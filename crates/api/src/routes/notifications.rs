use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET  /             -> list_notifications (any authenticated user)
/// POST /broadcast    -> broadcast (staff)
/// GET  /{id}         -> get_notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/broadcast", post(notifications::broadcast))
        .route("/{id}", get(notifications::get_notification))
}
