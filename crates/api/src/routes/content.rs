use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/admin/content`.
///
/// ```text
/// GET    /          -> list_content
/// GET    /{slug}    -> get_content
/// PUT    /{slug}    -> upsert_content
/// DELETE /{slug}    -> delete_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content))
        .route(
            "/{slug}",
            get(content::get_content)
                .put(content::upsert_content)
                .delete(content::delete_content),
        )
}
