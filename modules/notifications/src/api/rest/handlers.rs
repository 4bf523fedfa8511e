use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use modcore::problem::{internal_error, not_found, ProblemResponse};

use crate::api::rest::dto::{RecentQuery, UnreadCountResponse};
use crate::contract::model::Notification;
use crate::domain::error::DomainError;
use crate::domain::service::NotificationsService;

fn map_error(e: DomainError) -> ProblemResponse {
    match e {
        DomainError::NotFound { id } => not_found(format!("notification {id} not found")),
        DomainError::Database { .. } => internal_error("storage failure"),
    }
}

/// `GET /users/{user_id}/notifications?limit=`
pub async fn list_recent(
    State(service): State<Arc<NotificationsService>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<Notification>>, ProblemResponse> {
    let rows = service
        .list_recent(user_id, query.limit)
        .await
        .map_err(map_error)?;
    Ok(Json(rows))
}

/// `GET /users/{user_id}/notifications/unread-count`
pub async fn unread_count(
    State(service): State<Arc<NotificationsService>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UnreadCountResponse>, ProblemResponse> {
    let count = service.unread_count(user_id).await.map_err(map_error)?;
    Ok(Json(UnreadCountResponse { count }))
}

/// `POST /notifications/{id}/read`
pub async fn mark_read(
    State(service): State<Arc<NotificationsService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    service.mark_read(id).await.map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}
