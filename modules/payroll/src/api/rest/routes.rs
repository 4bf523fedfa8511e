use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::api::rest::handlers;
use crate::domain::service::PayrollService;

pub fn register_routes(router: Router, service: Arc<PayrollService>) -> Router {
    let scoped = Router::new()
        .route(
            "/staff",
            get(handlers::list_staff).post(handlers::create_staff),
        )
        .route(
            "/staff/{id}",
            get(handlers::get_staff)
                .put(handlers::update_staff)
                .delete(handlers::delete_staff),
        )
        .route(
            "/staff/{id}/payments",
            get(handlers::list_staff_payments).post(handlers::record_staff_payment),
        )
        .route(
            "/salary-players",
            get(handlers::list_salary_players).post(handlers::create_salary_player),
        )
        .route(
            "/salary-players/{id}",
            get(handlers::get_salary_player).delete(handlers::delete_salary_player),
        )
        .route(
            "/salary-players/{id}/salary",
            get(handlers::get_salary).put(handlers::set_salary),
        )
        .route(
            "/salary-players/{id}/payments",
            get(handlers::list_salary_payments).post(handlers::record_salary_payment),
        )
        .route("/salary-stats", get(handlers::salary_stats))
        .with_state(service);
    router.merge(scoped)
}
