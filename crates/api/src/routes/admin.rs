//! Route definitions for the `/admin` surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::routes::{content, events, families, gallery, houses, members, ministries, sacraments};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Every handler requires `ADMIN`, `PASTOR` or `STAFF`; settings writes
/// require `ADMIN` (enforced by handler extractors).
///
/// ```text
/// /members/*       member directory, approval, placement
/// /families/*      families, tree, related families
/// /houses/*        houses and their heads
/// /ministries/*    ministries and memberships
/// /events/*        events and publication
/// /sacraments/*    sacrament records
/// /gallery/*       categories, albums, images
/// /settings        GET map, PUT merge
/// /content/*       site content blocks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/members", members::router())
        .nest("/families", families::router())
        .nest("/houses", houses::router())
        .nest("/ministries", ministries::router())
        .nest("/events", events::router())
        .nest("/sacraments", sacraments::router())
        .nest("/gallery", gallery::router())
        .nest("/content", content::router())
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
}
