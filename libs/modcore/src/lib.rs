//! Slim module kernel: wiring contracts, per-module context, a type-safe
//! client hub for cross-module APIs, and a registry that drives the phased
//! startup sequence (init → migrate → rest → start) and shutdown.

pub mod client_hub;
pub mod context;
pub mod contracts;
pub mod problem;
pub mod registry;

pub use client_hub::ClientHub;
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};
pub use contracts::{DbModule, Module, RestfulModule, StatefulModule};
pub use problem::{Problem, ProblemResponse};
pub use registry::ModuleRegistry;
