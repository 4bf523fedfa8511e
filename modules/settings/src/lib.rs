//! Per-user application settings with write-through persistence.
//!
//! Settings are stored as one JSON blob per user. Reads backfill missing
//! fields from defaults, so older blobs keep working after the settings
//! shape grows. Loads fail open (defaults), saves fail closed.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
pub mod module;
pub mod provider;

pub use contract::model::{EmailNotifications, EmailSettings, Language, Theme, UserSettings};
pub use module::SettingsModule;
pub use provider::{SettingsProvider, SettingsState};
