use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use modcore::problem::{bad_request, internal_error, not_found, ProblemResponse};

use crate::api::rest::dto::{
    CreatePlayerRequest, CreateTeamRequest, ReceiptEmailResponse, RecordPaymentRequest,
    RenameTeamRequest, UpdatePlayerRequest,
};
use crate::contract::model::{Payment, Player, Team, TeamFeeSummary};
use crate::domain::error::DomainError;
use crate::domain::service::{ReceiptEmailOutcome, RosterService};

fn map_error(e: DomainError) -> ProblemResponse {
    match e {
        DomainError::TeamNotFound { id } => not_found(format!("team {id} not found")),
        DomainError::PlayerNotFound { id } => not_found(format!("player {id} not found")),
        DomainError::PaymentNotFound { id } => not_found(format!("payment {id} not found")),
        DomainError::Validation { .. } => bad_request(e.to_string()),
        DomainError::Email { .. } => internal_error("email delivery failure"),
        DomainError::Database { .. } => internal_error("storage failure"),
    }
}

// ---- teams ----

pub async fn create_team(
    State(service): State<Arc<RosterService>>,
    Json(body): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), ProblemResponse> {
    let created = service.create_team(body.name).await.map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_teams(
    State(service): State<Arc<RosterService>>,
) -> Result<Json<Vec<Team>>, ProblemResponse> {
    Ok(Json(service.list_teams().await.map_err(map_error)?))
}

pub async fn get_team(
    State(service): State<Arc<RosterService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Team>, ProblemResponse> {
    Ok(Json(service.get_team(id).await.map_err(map_error)?))
}

pub async fn rename_team(
    State(service): State<Arc<RosterService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameTeamRequest>,
) -> Result<Json<Team>, ProblemResponse> {
    let updated = service
        .rename_team(id, body.name)
        .await
        .map_err(map_error)?;
    Ok(Json(updated))
}

pub async fn delete_team(
    State(service): State<Arc<RosterService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    service.delete_team(id).await.map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- players ----

pub async fn create_player(
    State(service): State<Arc<RosterService>>,
    Path(team_id): Path<Uuid>,
    Json(body): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ProblemResponse> {
    let created = service
        .create_player(body.into_new(team_id))
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_team_players(
    State(service): State<Arc<RosterService>>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<Player>>, ProblemResponse> {
    Ok(Json(
        service
            .list_players_by_team(team_id)
            .await
            .map_err(map_error)?,
    ))
}

pub async fn get_player(
    State(service): State<Arc<RosterService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Player>, ProblemResponse> {
    Ok(Json(service.get_player(id).await.map_err(map_error)?))
}

pub async fn update_player(
    State(service): State<Arc<RosterService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePlayerRequest>,
) -> Result<Json<Player>, ProblemResponse> {
    let updated = service
        .update_player(id, body.into())
        .await
        .map_err(map_error)?;
    Ok(Json(updated))
}

pub async fn delete_player(
    State(service): State<Arc<RosterService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    service.delete_player(id).await.map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- payments ----

pub async fn record_payment(
    State(service): State<Arc<RosterService>>,
    Path(player_id): Path<Uuid>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), ProblemResponse> {
    let payment = service
        .record_payment(body.into_new(player_id))
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_payments(
    State(service): State<Arc<RosterService>>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, ProblemResponse> {
    Ok(Json(
        service.list_payments(player_id).await.map_err(map_error)?,
    ))
}

pub async fn send_receipt_email(
    State(service): State<Arc<RosterService>>,
    Path((player_id, payment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ReceiptEmailResponse>, ProblemResponse> {
    let outcome = service
        .send_receipt_email(player_id, payment_id)
        .await
        .map_err(map_error)?;
    let status = match outcome {
        ReceiptEmailOutcome::Sent => "sent",
        ReceiptEmailOutcome::NoEmailAddress => "no_email_address",
        ReceiptEmailOutcome::MailerUnconfigured => "mailer_unconfigured",
    };
    Ok(Json(ReceiptEmailResponse { status }))
}

// ---- fees ----

pub async fn fee_summary(
    State(service): State<Arc<RosterService>>,
) -> Result<Json<Vec<TeamFeeSummary>>, ProblemResponse> {
    Ok(Json(service.fee_summary().await.map_err(map_error)?))
}
