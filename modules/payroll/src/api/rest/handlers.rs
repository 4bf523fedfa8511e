use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use modcore::problem::{bad_request, internal_error, not_found, ProblemResponse};

use crate::api::rest::dto::{
    CreateSalaryPlayerRequest, CreateStaffRequest, RecordSalaryPaymentRequest,
    RecordStaffPaymentRequest, SetSalaryRequest, UpdateStaffRequest,
};
use crate::contract::model::{
    PlayerSalary, SalaryPayment, SalaryPlayer, SalaryStats, StaffMember, StaffPayment,
};
use crate::domain::error::DomainError;
use crate::domain::service::PayrollService;

fn map_error(e: DomainError) -> ProblemResponse {
    match e {
        DomainError::StaffNotFound { id } => not_found(format!("staff member {id} not found")),
        DomainError::PlayerNotFound { id } => not_found(format!("salary player {id} not found")),
        DomainError::NoSalary { id } => not_found(format!("no salary configured for player {id}")),
        DomainError::Validation { .. } => bad_request(e.to_string()),
        DomainError::Database { .. } => internal_error("storage failure"),
    }
}

// ---- staff ----

pub async fn create_staff(
    State(service): State<Arc<PayrollService>>,
    Json(body): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<StaffMember>), ProblemResponse> {
    let created = service.create_staff(body.into()).await.map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_staff(
    State(service): State<Arc<PayrollService>>,
) -> Result<Json<Vec<StaffMember>>, ProblemResponse> {
    Ok(Json(service.list_staff().await.map_err(map_error)?))
}

pub async fn get_staff(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StaffMember>, ProblemResponse> {
    Ok(Json(service.get_staff(id).await.map_err(map_error)?))
}

pub async fn update_staff(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStaffRequest>,
) -> Result<Json<StaffMember>, ProblemResponse> {
    let updated = service
        .update_staff(id, body.into())
        .await
        .map_err(map_error)?;
    Ok(Json(updated))
}

pub async fn delete_staff(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    service.delete_staff(id).await.map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_staff_payment(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordStaffPaymentRequest>,
) -> Result<(StatusCode, Json<StaffPayment>), ProblemResponse> {
    let payment = service
        .record_staff_payment(body.into_new(id))
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_staff_payments(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StaffPayment>>, ProblemResponse> {
    Ok(Json(
        service.list_staff_payments(id).await.map_err(map_error)?,
    ))
}

// ---- salaried players ----

pub async fn create_salary_player(
    State(service): State<Arc<PayrollService>>,
    Json(body): Json<CreateSalaryPlayerRequest>,
) -> Result<(StatusCode, Json<SalaryPlayer>), ProblemResponse> {
    let created = service
        .create_salary_player(body.into())
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_salary_players(
    State(service): State<Arc<PayrollService>>,
) -> Result<Json<Vec<SalaryPlayer>>, ProblemResponse> {
    Ok(Json(service.list_salary_players().await.map_err(map_error)?))
}

pub async fn get_salary_player(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SalaryPlayer>, ProblemResponse> {
    Ok(Json(service.get_salary_player(id).await.map_err(map_error)?))
}

pub async fn delete_salary_player(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    service.delete_salary_player(id).await.map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_salary(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetSalaryRequest>,
) -> Result<(StatusCode, Json<PlayerSalary>), ProblemResponse> {
    let revision = service
        .set_salary(id, body.salary)
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(revision)))
}

pub async fn get_salary(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlayerSalary>, ProblemResponse> {
    Ok(Json(service.current_salary(id).await.map_err(map_error)?))
}

pub async fn record_salary_payment(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordSalaryPaymentRequest>,
) -> Result<(StatusCode, Json<SalaryPayment>), ProblemResponse> {
    let payment = service
        .record_salary_payment(body.into_new(id))
        .await
        .map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_salary_payments(
    State(service): State<Arc<PayrollService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SalaryPayment>>, ProblemResponse> {
    Ok(Json(
        service.list_salary_payments(id).await.map_err(map_error)?,
    ))
}

/// `GET /salary-stats` — payroll figures for the current month.
pub async fn salary_stats(
    State(service): State<Arc<PayrollService>>,
) -> Result<Json<SalaryStats>, ProblemResponse> {
    let today = Utc::now().date_naive();
    Ok(Json(service.salary_stats(today).await.map_err(map_error)?))
}
