//! Staff payroll and salaried-player payments.
//!
//! Tracks club staff and their payments, plus the separate roster of
//! salaried players whose salary history and payments feed the monthly
//! obligation scanner in the notifications module.

pub mod api;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
pub mod module;

pub use module::PayrollModule;
