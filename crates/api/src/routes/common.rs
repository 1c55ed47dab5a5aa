use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/common`.
///
/// ```text
/// POST /upload    -> upload_file (multipart `file`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload::upload_file))
}
