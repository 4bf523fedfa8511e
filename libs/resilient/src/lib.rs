//! Bounded-retry execution for remote data operations.
//!
//! Every remote call in the server goes through a `(data, error)` style
//! contract: an operation eventually yields `Ok(Some(data))`, `Ok(None)`
//! (empty result) or `Err(e)`. [`QueryExecutor`] wraps one such operation
//! with a small, fixed retry budget and exponential backoff, and collapses
//! all failure shapes into a single [`QueryError`].
//!
//! There is deliberately no error classification: every error is treated as
//! transient and retried until the attempt budget runs out. There is no
//! jitter, no circuit breaker and no cancellation of an in-flight loop.
//! The backoff delay is routed through the [`Sleeper`] trait so tests can
//! substitute a zero-delay clock.

mod executor;
mod sleep;

pub use executor::{QueryError, QueryExecutor, QueryOptions};
pub use sleep::{Sleeper, TokioSleeper};
