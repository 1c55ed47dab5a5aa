//! Handlers for `/admin/settings`, a flat key -> JSON map.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use parish_core::content::validate_key;
use parish_db::repositories::SettingRepo;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/settings
pub async fn get_settings(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BTreeMap<String, Value>>>> {
    let settings = SettingRepo::map(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/settings (ADMIN only)
///
/// Merges the body into the stored map; keys not sent are kept. Returns the
/// full map after the merge.
pub async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<BTreeMap<String, Value>>,
) -> AppResult<Json<DataResponse<BTreeMap<String, Value>>>> {
    for key in input.keys() {
        validate_key("Setting key", key)?;
    }

    SettingRepo::merge(&state.pool, &input).await?;
    tracing::info!(keys = input.len(), updated_by = admin.user_id, "Settings updated");

    let settings = SettingRepo::map(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}
