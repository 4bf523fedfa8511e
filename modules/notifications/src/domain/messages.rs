//! Builders for the application's Spanish notification texts.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::contract::model::{NewNotification, KIND_PAYMENT_DUE, KIND_PAYMENT_RECEIVED};

/// Render a minor-units amount as "123.45".
pub fn format_amount(minor: i64) -> String {
    format!("{}.{:02}", minor / 100, (minor % 100).abs())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn payment_due(
    user_id: Uuid,
    name: &str,
    amount_minor: i64,
    due_date: NaiveDate,
) -> NewNotification {
    NewNotification {
        user_id,
        kind: KIND_PAYMENT_DUE.to_string(),
        title: "Pago Pendiente".to_string(),
        message: format!(
            "El pago de {}€ para {} vence el {}",
            format_amount(amount_minor),
            name,
            format_date(due_date)
        ),
    }
}

pub fn payment_received(user_id: Uuid, name: &str, amount_minor: i64) -> NewNotification {
    NewNotification {
        user_id,
        kind: KIND_PAYMENT_RECEIVED.to_string(),
        title: "Pago Recibido".to_string(),
        message: format!(
            "Se ha registrado un pago de {}€ de {}",
            format_amount(amount_minor),
            name
        ),
    }
}
