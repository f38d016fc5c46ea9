//! Pacing policy between provider calls
//!
//! The workflow pauses after every detail call as a crude fixed-interval
//! rate limiter. The policy is injected so tests run with zero delay and
//! alternative policies can be slotted in without touching the workflow.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// A pacing policy applied after each detail call
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Fixed-delay pacing (production default)
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        debug!(delay_ms = %self.delay.as_millis(), "FixedDelay::pause: called");
        tokio::time::sleep(self.delay).await;
    }
}

/// No-op pacing for tests and dry runs
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {
        debug!("NoDelay::pause: called");
    }
}
