use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::sleep::{Sleeper, TokioSleeper};

/// Per-invocation configuration for [`QueryExecutor::run`].
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Total attempt budget, including the first attempt. Clamped to >= 1.
    pub max_attempts: u32,
    /// When true, an empty result (`Ok(None)`) is a valid outcome and is
    /// returned immediately. When false it is retried like an error.
    pub allow_empty: bool,
    /// Message reported on exhaustion instead of the last underlying error.
    pub error_message: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            allow_empty: false,
            error_message: None,
        }
    }
}

impl QueryOptions {
    pub fn with_message(msg: impl Into<String>) -> Self {
        Self {
            error_message: Some(msg.into()),
            ..Self::default()
        }
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }
}

/// Terminal failure of a retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub message: String,
    pub attempts: u32,
}

impl Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for QueryError {}

const FALLBACK_MESSAGE: &str = "operation failed";
const EMPTY_MESSAGE: &str = "no data found";

/// Executes remote operations with bounded retry and exponential backoff.
#[derive(Clone)]
pub struct QueryExecutor {
    sleeper: Arc<dyn Sleeper>,
}

impl Default for QueryExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryExecutor {
    pub fn new() -> Self {
        Self {
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Build an executor with a custom delay source (tests).
    pub fn with_sleeper(sleeper: Arc<dyn Sleeper>) -> Self {
        Self { sleeper }
    }

    /// Run `op` until it yields data, up to `opts.max_attempts` attempts.
    ///
    /// Between attempt `n` and `n + 1` the caller is suspended for `2^n`
    /// seconds (2s, 4s, 8s, ...). Errors are never classified; any `Err`
    /// and, unless `allow_empty` is set, any `Ok(None)` consumes one
    /// attempt. On exhaustion the configured `error_message` wins over the
    /// last underlying error's message, which wins over a generic fallback.
    pub async fn run<T, E, F, Fut>(
        &self,
        opts: &QueryOptions,
        mut op: F,
    ) -> Result<Option<T>, QueryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
        E: Display,
    {
        let max_attempts = opts.max_attempts.max(1);
        let mut last_error: Option<String> = None;

        for attempt in 1..=max_attempts {
            let failure = match op().await {
                Ok(Some(data)) => return Ok(Some(data)),
                Ok(None) if opts.allow_empty => return Ok(None),
                Ok(None) => EMPTY_MESSAGE.to_string(),
                Err(e) => e.to_string(),
            };

            warn!(attempt, error = %failure, "query attempt failed");
            last_error = Some(failure);

            if attempt < max_attempts {
                let backoff = Duration::from_secs(2u64.saturating_pow(attempt));
                self.sleeper.sleep(backoff).await;
            }
        }

        Err(QueryError {
            message: opts
                .error_message
                .clone()
                .or(last_error)
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            attempts: max_attempts,
        })
    }
}
