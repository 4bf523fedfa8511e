//! Team and player roster with membership-fee tracking.
//!
//! Players carry a `total_fee` and a stored `paid_amount` aggregate;
//! recording a payment inserts the payment row and bumps the aggregate in
//! one transaction, then raises a payment-received notification.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::RosterModule;
