//! In-app notification log plus the monthly salary-obligation scanner.
//!
//! The log is append-only: rows are created by this module's own scanner
//! and by other modules through [`contract::client::NotificationsApi`];
//! the only mutation ever applied is flipping the `read` flag.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
pub mod module;

pub use contract::client::NotificationsApi;
pub use contract::model::{NewNotification, Notification};
pub use domain::ports::{ObligationPayment, ObligationsSource, SalaryObligation};
pub use module::NotificationsModule;
