use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::api::rest::handlers;
use crate::domain::service::InvoicesService;

pub fn register_routes(router: Router, service: Arc<InvoicesService>) -> Router {
    let scoped = Router::new()
        .route(
            "/invoices",
            get(handlers::list_invoices).post(handlers::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(handlers::get_invoice).delete(handlers::delete_invoice),
        )
        .with_state(service);
    router.merge(scoped)
}
