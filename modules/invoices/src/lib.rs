//! Club invoicing with server-computed totals.
//!
//! Invoice line items carry a quantity and a unit price in minor units; the
//! per-item amount, subtotal, tax and total are always computed here, never
//! taken from the caller. Invoice numbers follow a per-year sequence.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::InvoicesModule;
