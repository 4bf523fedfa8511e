use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::rest::handlers;
use crate::domain::service::RosterService;

pub fn register_routes(router: Router, service: Arc<RosterService>) -> Router {
    let scoped = Router::new()
        .route(
            "/teams",
            get(handlers::list_teams).post(handlers::create_team),
        )
        .route(
            "/teams/{id}",
            get(handlers::get_team)
                .put(handlers::rename_team)
                .delete(handlers::delete_team),
        )
        .route(
            "/teams/{team_id}/players",
            get(handlers::list_team_players).post(handlers::create_player),
        )
        .route(
            "/players/{id}",
            get(handlers::get_player)
                .put(handlers::update_player)
                .delete(handlers::delete_player),
        )
        .route(
            "/players/{id}/payments",
            get(handlers::list_payments).post(handlers::record_payment),
        )
        .route(
            "/players/{player_id}/payments/{payment_id}/receipt-email",
            post(handlers::send_receipt_email),
        )
        .route("/fees/summary", get(handlers::fee_summary))
        .with_state(service);
    router.merge(scoped)
}
