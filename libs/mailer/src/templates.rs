//! HTML bodies for the club's transactional emails (Spanish).

use chrono::NaiveDate;

/// Render a minor-units amount (integer cents) as "123.45".
fn format_amount(minor: i64) -> String {
    format!("{}.{:02}", minor / 100, (minor % 100).abs())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

const STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; }\n\
.container { max-width: 600px; margin: 0 auto; padding: 20px; }\n\
.header { background: #f8f9fa; padding: 20px; border-radius: 5px; }\n\
.details { margin: 20px 0; }\n\
.footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; }";

fn wrap(header: &str, details: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    <style>\n{STYLE}\n    </style>\n  </head>\n  <body>\n    <div class=\"container\">\n      <div class=\"header\">\n        <h1>{header}</h1>\n      </div>\n      <div class=\"details\">\n{details}\n      </div>\n      <div class=\"footer\">\n        <p>Saludos cordiales,<br>Club Deportivo</p>\n      </div>\n    </div>\n  </body>\n</html>"
    )
}

/// Receipt confirmation sent after a payment is registered.
pub fn receipt_email_html(
    player_name: &str,
    receipt_number: &str,
    amount_minor: i64,
    date: NaiveDate,
) -> String {
    let details = format!(
        "        <p>Estimado/a {player_name},</p>\n        <p>Se ha registrado correctamente su pago con los siguientes detalles:</p>\n        <ul>\n          <li>Número de recibo: {receipt_number}</li>\n          <li>Importe: {}€</li>\n          <li>Fecha: {}</li>\n        </ul>",
        format_amount(amount_minor),
        format_date(date)
    );
    wrap("Recibo de Pago", &details)
}
