use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::api::rest::handlers;
use crate::domain::service::SettingsService;

pub fn register_routes(router: Router, service: Arc<SettingsService>) -> Router {
    let scoped = Router::new()
        .route(
            "/users/{user_id}/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .with_state(service);
    router.merge(scoped)
}
