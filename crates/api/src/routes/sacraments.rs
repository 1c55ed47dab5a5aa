use axum::routing::get;
use axum::Router;

use crate::handlers::sacraments;
use crate::state::AppState;

/// Routes mounted at `/admin/sacraments`.
///
/// ```text
/// GET    /        -> list_sacraments (?member_id=&sacrament_type=)
/// POST   /        -> create_sacrament
/// GET    /{id}    -> get_sacrament
/// PUT    /{id}    -> update_sacrament
/// DELETE /{id}    -> delete_sacrament
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sacraments::list_sacraments).post(sacraments::create_sacrament),
        )
        .route(
            "/{id}",
            get(sacraments::get_sacrament)
                .put(sacraments::update_sacrament)
                .delete(sacraments::delete_sacrament),
        )
}
