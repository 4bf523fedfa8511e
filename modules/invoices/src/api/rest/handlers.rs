use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use modcore::problem::{bad_request, internal_error, not_found, ProblemResponse};

use crate::api::rest::dto::CreateInvoiceRequest;
use crate::contract::model::Invoice;
use crate::domain::error::DomainError;
use crate::domain::service::InvoicesService;

fn map_error(e: DomainError) -> ProblemResponse {
    match e {
        DomainError::NotFound { id } => not_found(format!("invoice {id} not found")),
        DomainError::Validation { .. } => bad_request(e.to_string()),
        DomainError::Database { .. } => internal_error("storage failure"),
    }
}

pub async fn create_invoice(
    State(service): State<Arc<InvoicesService>>,
    Json(body): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), ProblemResponse> {
    let created = service.create(body.into()).await.map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_invoices(
    State(service): State<Arc<InvoicesService>>,
) -> Result<Json<Vec<Invoice>>, ProblemResponse> {
    Ok(Json(service.list().await.map_err(map_error)?))
}

pub async fn get_invoice(
    State(service): State<Arc<InvoicesService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, ProblemResponse> {
    Ok(Json(service.get(id).await.map_err(map_error)?))
}

pub async fn delete_invoice(
    State(service): State<Arc<InvoicesService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ProblemResponse> {
    service.delete(id).await.map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}
