//! Request pacing shared by every outbound request of one client.
//!
//! The pacer hands out start slots at least `min_interval` apart. A caller
//! reserves its slot under the lock and sleeps outside it, so concurrent
//! callers queue up in reservation order instead of serializing on the
//! mutex for the whole wait.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub(crate) struct RequestPacer {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Waits until this caller may start a request.
    ///
    /// Returns immediately when pacing is disabled (`min_interval == 0`).
    pub(crate) async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let start = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let start = match *next_slot {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next_slot = Some(start + self.min_interval);
            start
        };

        let delay = start.saturating_duration_since(Instant::now());
        if !delay.is_zero() {
            tracing::debug!(delay_ms = delay.as_millis(), "pacing outbound request");
        }
        tokio::time::sleep_until(start).await;
    }
}
