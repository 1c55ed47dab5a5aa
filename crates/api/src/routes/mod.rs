pub mod admin;
pub mod auth;
pub mod common;
pub mod content;
pub mod events;
pub mod families;
pub mod gallery;
pub mod health;
pub mod houses;
pub mod members;
pub mod ministries;
pub mod notifications;
pub mod sacraments;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/register                               self-registration (public)
///
/// /users                                       list, create (admin)
/// /users/me                                    current user
/// /users/{id}                                  get, update, deactivate (admin)
/// /users/{id}/reset-password                   reset password (admin)
///
/// /admin/members                               directory, create
/// /admin/members/{id}                          get, update, delete
/// /admin/members/{id}/approve                  approve pending member
/// /admin/members/{id}/status                   manual status change
/// /admin/members/{id}/family                   assign / remove placement
/// /admin/members/{id}/family-role              change family role
/// /admin/members/{id}/spouse                   set / clear spouse
///
/// /admin/families                              list, create
/// /admin/families/{id}                         get, update, delete
/// /admin/families/{id}/tree                    household tree
/// /admin/families/{id}/members                 members of the family
/// /admin/families/{id}/houses                  houses of the family
/// /admin/families/{id}/related                 list, link
/// /admin/families/{id}/related/{related_id}    unlink
///
/// /admin/houses                                create
/// /admin/houses/{id}                           get, update, delete
/// /admin/houses/{id}/members                   residents
/// /admin/houses/{id}/head                      set / clear head
///
/// /admin/ministries/*                          ministries and memberships
/// /admin/events/*                              events, publish, live, featured
/// /admin/sacraments/*                          sacrament records
/// /admin/gallery/*                             categories, albums, images
/// /admin/settings                              GET (staff), PUT (admin)
/// /admin/content/*                             content blocks by slug
///
/// /notifications                               visible broadcasts
/// /notifications/broadcast                     send a broadcast (staff)
/// /notifications/{id}                          one broadcast
///
/// /common/upload                               multipart file upload
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/admin", admin::router())
        .nest("/notifications", notifications::router())
        .nest("/common", common::router())
}
