use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/admin/gallery`.
///
/// ```text
/// GET    /categories              -> list_categories
/// POST   /categories              -> create_category
/// PUT    /categories/{id}         -> update_category
/// DELETE /categories/{id}         -> delete_category
///
/// GET    /albums                  -> list_albums (?category_id=)
/// POST   /albums                  -> create_album
/// GET    /albums/{id}             -> get_album
/// PUT    /albums/{id}             -> update_album
/// DELETE /albums/{id}             -> delete_album
/// GET    /albums/{id}/images      -> list_images
/// POST   /albums/{id}/images      -> link_images
/// DELETE /images/{id}             -> delete_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(gallery::list_categories).post(gallery::create_category),
        )
        .route(
            "/categories/{id}",
            put(gallery::update_category).delete(gallery::delete_category),
        )
        .route("/albums", get(gallery::list_albums).post(gallery::create_album))
        .route(
            "/albums/{id}",
            get(gallery::get_album)
                .put(gallery::update_album)
                .delete(gallery::delete_album),
        )
        .route(
            "/albums/{id}/images",
            get(gallery::list_images).post(gallery::link_images),
        )
        .route("/images/{id}", delete(gallery::delete_image))
}
