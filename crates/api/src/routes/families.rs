use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::families;
use crate::state::AppState;

/// Routes mounted at `/admin/families`.
///
/// ```text
/// GET    /                            -> list_families (?search=)
/// POST   /                            -> create_family
/// GET    /{id}                        -> get_family
/// PUT    /{id}                        -> update_family
/// DELETE /{id}                        -> delete_family
/// GET    /{id}/tree                   -> family_tree
/// GET    /{id}/members                -> list_family_members
/// GET    /{id}/houses                 -> list_family_houses
/// GET    /{id}/related                -> list_related
/// POST   /{id}/related                -> link_related
/// DELETE /{id}/related/{related_id}   -> unlink_related
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(families::list_families).post(families::create_family))
        .route(
            "/{id}",
            get(families::get_family)
                .put(families::update_family)
                .delete(families::delete_family),
        )
        .route("/{id}/tree", get(families::family_tree))
        .route("/{id}/members", get(families::list_family_members))
        .route("/{id}/houses", get(families::list_family_houses))
        .route(
            "/{id}/related",
            get(families::list_related).post(families::link_related),
        )
        .route("/{id}/related/{related_id}", delete(families::unlink_related))
}
