use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/admin/events`.
///
/// ```text
/// GET    /                  -> list_events (?status=)
/// POST   /                  -> create_event
/// GET    /{id}              -> get_event
/// PUT    /{id}              -> update_event
/// DELETE /{id}              -> delete_event
/// POST   /{id}/publish      -> publish_event
/// POST   /{id}/unpublish    -> unpublish_event
/// PUT    /{id}/live         -> set_live
/// PUT    /{id}/featured     -> set_featured
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/{id}/publish", post(events::publish_event))
        .route("/{id}/unpublish", post(events::unpublish_event))
        .route("/{id}/live", put(events::set_live))
        .route("/{id}/featured", put(events::set_featured))
}
