use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Routes mounted at `/admin/members`.
///
/// ```text
/// GET    /                     -> list_members (search, filter, sort, paginate)
/// POST   /                     -> create_member
/// GET    /{id}                 -> get_member
/// PUT    /{id}                 -> update_member
/// DELETE /{id}                 -> delete_member
/// POST   /{id}/approve         -> approve_member
/// PUT    /{id}/status          -> change_status
/// PUT    /{id}/family          -> assign_family
/// DELETE /{id}/family          -> remove_from_family
/// PUT    /{id}/family-role     -> change_family_role
/// PUT    /{id}/spouse          -> set_spouse
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list_members).post(members::create_member))
        .route(
            "/{id}",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route("/{id}/approve", post(members::approve_member))
        .route("/{id}/status", put(members::change_status))
        .route(
            "/{id}/family",
            put(members::assign_family).delete(members::remove_from_family),
        )
        .route("/{id}/family-role", put(members::change_family_role))
        .route("/{id}/spouse", put(members::set_spouse))
}
