use governor::{DefaultDirectRateLimiter, Quota};
use nonzero_ext::nonzero;
use std::{num::NonZeroU32, time::Duration};

// Job boards throttle aggressively, keep detail fetches polite.
const REQ_PER_SEC: NonZeroU32 = nonzero!(2u32);
const MIN_GAP: Duration = Duration::from_millis(250);

pub struct RateLimiter {
    req_per_sec: DefaultDirectRateLimiter,
    min_gap: DefaultDirectRateLimiter,
}

impl RateLimiter {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_limits(REQ_PER_SEC, MIN_GAP)
    }

    pub fn with_limits(req_per_sec: NonZeroU32, min_gap: Duration) -> anyhow::Result<Self> {
        let gap_quota = Quota::with_period(min_gap)
            .ok_or_else(|| anyhow::anyhow!("request gap must be non-zero, got {min_gap:?}"))?;
        Ok(RateLimiter {
            req_per_sec: DefaultDirectRateLimiter::direct(Quota::per_second(req_per_sec)),
            min_gap: DefaultDirectRateLimiter::direct(gap_quota),
        })
    }

    pub async fn wait_until_ready(&self) {
        // Average rate first, then the spacing between consecutive requests.
        self.req_per_sec.until_ready().await;
        self.min_gap.until_ready().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_gap_is_rejected() {
        assert!(RateLimiter::with_limits(REQ_PER_SEC, Duration::ZERO).is_err());
    }

    #[tokio::test]
    async fn first_request_passes_immediately() {
        let limiter = RateLimiter::new().unwrap();
        let started = std::time::Instant::now();
        limiter.wait_until_ready().await;
        assert!(started.elapsed() < Duration::from_millis(200));
    }
}
