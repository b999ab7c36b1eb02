use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;

// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied { retry_after_secs: u64 },
}

// Sliding-window request log, partitioned by client identity. Logs are
// created lazily per identity and pruned on every check, so an identity
// never retains timestamps older than the window.
pub struct RateLimiter {
    logs: DashMap<String, VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            logs: DashMap::new(),
            max_requests: max_requests as usize,
            window,
        }
    }

    pub fn check_and_record(&self, identity: &str) -> Decision {
        self.check_and_record_at(identity, Instant::now())
    }

    // Prune, check and append all run under the dashmap entry guard so two
    // concurrent requests from one identity cannot both observe a pre-prune
    // count and slip past the limit together.
    pub fn check_and_record_at(&self, identity: &str, now: Instant) -> Decision {
        let mut log = self.logs.entry(identity.to_string()).or_default();

        while let Some(&oldest) = log.front() {
            if now.duration_since(oldest) > self.window {
                log.pop_front();
            } else {
                break;
            }
        }

        if log.len() >= self.max_requests {
            let oldest = log.front().copied().unwrap_or(now);
            let remaining = self.window.saturating_sub(now.duration_since(oldest));
            let retry_after_secs = (remaining.as_secs_f64().ceil() as u64).max(1);
            return Decision::Denied { retry_after_secs };
        }

        log.push_back(now);
        Decision::Allowed
    }

    #[cfg(test)]
    fn recorded(&self, identity: &str) -> usize {
        self.logs.get(identity).map(|log| log.len()).unwrap_or(0)
    }
}
