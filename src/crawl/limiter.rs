// src/crawl/limiter.rs
// =============================================================================
// A tiny rate limiter shared by every fetch of one crawl run.
//
// Each call to acquire() reserves the next free start slot, and slots are at
// least `gap` apart. With one fetch in flight at a time the limiter never
// waits, because the driver already sleeps `gap` after each fetch. With a
// worker pool it keeps the whole pool at one fetch start per `gap`.
//
// Rust concepts:
// - tokio::sync::Mutex: A lock that can be awaited instead of blocking
// - sleep_until: Wait for a specific instant on tokio's clock
// =============================================================================

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

#[derive(Debug)]
pub struct RateLimiter {
    gap: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(gap: Duration) -> Self {
        Self {
            gap,
            next_slot: Mutex::new(None),
        }
    }

    // Waits until this caller is allowed to start a fetch
    pub async fn acquire(&self) {
        if self.gap.is_zero() {
            return;
        }

        let slot = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next_slot {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next_slot = Some(slot + self.gap);
            slot
        };

        sleep_until(slot).await;
    }
}
