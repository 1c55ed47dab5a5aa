use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::houses;
use crate::state::AppState;

/// Routes mounted at `/admin/houses`.
///
/// ```text
/// POST   /                -> create_house (body carries family_id)
/// GET    /{id}            -> get_house
/// PUT    /{id}            -> update_house
/// DELETE /{id}            -> delete_house
/// GET    /{id}/members    -> list_house_members
/// PUT    /{id}/head       -> set_head
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(houses::create_house))
        .route(
            "/{id}",
            get(houses::get_house)
                .put(houses::update_house)
                .delete(houses::delete_house),
        )
        .route("/{id}/members", get(houses::list_house_members))
        .route("/{id}/head", put(houses::set_head))
}
