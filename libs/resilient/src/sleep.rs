use std::time::Duration;

use async_trait::async_trait;

/// Injectable delay source for the retry loop.
///
/// Production code uses [`TokioSleeper`]; tests substitute a recording
/// zero-delay implementation so retry behavior can be asserted without
/// waiting wall-clock seconds.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, d: Duration);
}

/// Default sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, d: Duration) {
        tokio::time::sleep(d).await;
    }
}
