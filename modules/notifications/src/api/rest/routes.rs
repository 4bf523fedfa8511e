use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::rest::handlers;
use crate::domain::service::NotificationsService;

pub fn register_routes(router: Router, service: Arc<NotificationsService>) -> Router {
    let scoped = Router::new()
        .route(
            "/users/{user_id}/notifications",
            get(handlers::list_recent),
        )
        .route(
            "/users/{user_id}/notifications/unread-count",
            get(handlers::unread_count),
        )
        .route("/notifications/{id}/read", post(handlers::mark_read))
        .with_state(service);
    router.merge(scoped)
}
