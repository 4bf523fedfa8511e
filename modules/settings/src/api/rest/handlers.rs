use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use modcore::problem::{internal_error, ProblemResponse};

use crate::contract::model::UserSettings;
use crate::domain::service::SettingsService;

/// `GET /users/{user_id}/settings` — always succeeds; loads fail open.
pub async fn get_settings(
    State(service): State<Arc<SettingsService>>,
    Path(user_id): Path<Uuid>,
) -> Json<UserSettings> {
    Json(service.load(user_id).await)
}

/// `PUT /users/{user_id}/settings` — full replace of the settings blob.
pub async fn put_settings(
    State(service): State<Arc<SettingsService>>,
    Path(user_id): Path<Uuid>,
    Json(settings): Json<UserSettings>,
) -> Result<StatusCode, ProblemResponse> {
    service
        .save(user_id, &settings)
        .await
        .map_err(|e| internal_error(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}
