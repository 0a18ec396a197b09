use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use okna_core::contact::{ContactRequest, SubmitError, Submitter};

/// Stand-in for a backend: waits, then reports success.
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Submitter for SimulatedSubmitter {
    async fn submit(&self, request: &ContactRequest) -> Result<(), SubmitError> {
        let millis = u32::try_from(self.delay.as_millis()).unwrap_or(u32::MAX);
        tracing::debug!(delay_ms = millis, has_message = !request.message.is_empty(), "Simulating contact submission");
        TimeoutFuture::new(millis).await;
        Ok(())
    }
}
