use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::ministries;
use crate::state::AppState;

/// Routes mounted at `/admin/ministries`.
///
/// ```text
/// GET    /                              -> list_ministries
/// POST   /                              -> create_ministry
/// GET    /{id}                          -> get_ministry
/// PUT    /{id}                          -> update_ministry
/// DELETE /{id}                          -> delete_ministry
/// GET    /{id}/members                  -> list_members
/// POST   /{id}/members                  -> add_member
/// DELETE /{id}/members/{member_id}      -> remove_member
/// PUT    /{id}/leader                   -> set_leader
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ministries::list_ministries).post(ministries::create_ministry),
        )
        .route(
            "/{id}",
            get(ministries::get_ministry)
                .put(ministries::update_ministry)
                .delete(ministries::delete_ministry),
        )
        .route(
            "/{id}/members",
            get(ministries::list_members).post(ministries::add_member),
        )
        .route("/{id}/members/{member_id}", delete(ministries::remove_member))
        .route("/{id}/leader", put(ministries::set_leader))
}
