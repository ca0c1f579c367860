use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Counters for requests dispatched by a gateway.
#[derive(Debug, Default)]
pub struct RequestStats {
    pub requests_sent: AtomicU64,
    pub failed_requests: AtomicU64,
    pub last_latency_ms: AtomicU64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn update_latency(&self, ms: u64) {
        self.last_latency_ms.store(ms, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests_sent.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failed_requests.load(Ordering::Relaxed)
    }

    pub fn last_latency(&self) -> u64 {
        self.last_latency_ms.load(Ordering::Relaxed)
    }

    pub fn log_stats(&self) {
        info!(
            "STATS: Requests: {} | Failed: {} | Last latency: {}ms",
            self.requests(),
            self.failures(),
            self.last_latency()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = RequestStats::new();
        stats.record_request();
        stats.record_request();
        stats.record_failure();
        stats.update_latency(42);

        assert_eq!(stats.requests(), 2);
        assert_eq!(stats.failures(), 1);
        assert_eq!(stats.last_latency(), 42);
    }
}
