//! Spacing decisions derived from quota headers and 429 responses

use super::types::RateState;
use crate::config::SerializerConfig;
use crate::core::remote::{QuotaSnapshot, RateLimitDetails};
use parking_lot::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Owns a serializer's [`RateState`] and every rule that mutates it
///
/// The lock is only held for arithmetic, never across an await point.
#[derive(Debug)]
pub struct RateGovernor {
    config: SerializerConfig,
    state: Mutex<RateState>,
}

impl RateGovernor {
    pub fn new(config: SerializerConfig) -> Self {
        let state = RateState::new(config.default_spacing());
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    pub fn snapshot(&self) -> RateState {
        self.state.lock().clone()
    }

    pub fn current_spacing(&self) -> Duration {
        self.state.lock().current_spacing
    }

    /// Apply the outcome of a settled call
    ///
    /// Without quota headers a success drops back to the default spacing and
    /// a failure leaves everything as it was.
    pub fn observe_response(&self, quota: Option<&QuotaSnapshot>, succeeded: bool) {
        match quota {
            Some(quota) => self.observe_quota_at(quota, now_millis()),
            None if succeeded => {
                let mut state = self.state.lock();
                state.current_spacing = self.config.default_spacing();
            }
            None => {}
        }
    }

    /// Recompute spacing from quota headers as of `now_ms`
    pub(crate) fn observe_quota_at(&self, quota: &QuotaSnapshot, now_ms: i64) {
        let default_spacing = self.config.default_spacing();
        let mut state = self.state.lock();
        state.limit = Some(quota.limit);
        state.remaining = Some(quota.remaining);
        state.reset_epoch_secs = quota.reset_epoch_secs;

        let threshold = quota.limit as f64 * self.config.low_quota_ratio;
        if quota.limit == 0 || (quota.remaining as f64) >= threshold {
            if state.current_spacing != default_spacing {
                debug!(
                    "Quota healthy ({}/{}), spacing back to {:?}",
                    quota.remaining, quota.limit, default_spacing
                );
            }
            state.current_spacing = default_spacing;
            return;
        }

        let base_ms = match quota.millis_until_reset(now_ms) {
            Some(until_reset) => div_ceil(until_reset, quota.remaining.max(1) as u64),
            None => self.config.default_spacing_ms,
        };
        let factor = self.spacing_factor(quota.remaining, threshold);
        let candidate = Duration::from_millis((base_ms as f64 * factor).ceil() as u64)
            .clamp(default_spacing, self.config.max_proactive_spacing().max(default_spacing));

        // Spacing only grows while the quota stays low
        let next = state.current_spacing.max(candidate);
        if next != state.current_spacing {
            info!(
                "Quota low ({}/{}), spacing raised to {:?}",
                quota.remaining, quota.limit, next
            );
        }
        state.current_spacing = next;
    }

    /// Linear ramp from `min_spacing_factor` at the low-quota threshold to
    /// `max_spacing_factor` at or below the floor
    pub fn spacing_factor(&self, remaining: u32, threshold: f64) -> f64 {
        let floor = self.config.low_quota_floor as f64;
        let remaining = remaining as f64;
        let (min, max) = (
            self.config.min_spacing_factor,
            self.config.max_spacing_factor,
        );

        if remaining <= floor || threshold <= floor {
            return max;
        }
        let progress = ((threshold - remaining) / (threshold - floor)).clamp(0.0, 1.0);
        min + (max - min) * progress
    }

    /// Record a 429 and return how long the remote asked us to wait
    pub fn observe_rate_limit(&self, details: &RateLimitDetails) -> Duration {
        self.observe_rate_limit_at(details, now_millis())
    }

    pub(crate) fn observe_rate_limit_at(&self, details: &RateLimitDetails, now_ms: i64) -> Duration {
        let wait = details
            .retry_after
            .or_else(|| {
                details
                    .quota
                    .and_then(|q| q.millis_until_reset(now_ms))
                    .map(Duration::from_millis)
            })
            .unwrap_or_else(|| self.config.fallback_retry_after());

        let default_spacing = self.config.default_spacing();
        let ceiling = self.config.max_reactive_spacing().max(default_spacing);
        let remaining = details.quota.map(|q| q.remaining).unwrap_or(0);
        let base_ms = div_ceil(wait.as_millis() as u64, remaining.max(1) as u64);
        let candidate = Duration::from_millis(
            (base_ms as f64 * self.config.max_spacing_factor).ceil() as u64,
        )
        .clamp(default_spacing, ceiling);

        let mut state = self.state.lock();
        if let Some(quota) = details.quota {
            state.limit = Some(quota.limit);
            state.remaining = Some(quota.remaining);
            state.reset_epoch_secs = quota.reset_epoch_secs;
        }
        state.rate_limited_count += 1;
        state.current_spacing = state.current_spacing.max(candidate).min(ceiling);

        warn!(
            "Rate limited by remote API, backing off {:?} (spacing now {:?})",
            wait, state.current_spacing
        );
        wait
    }

    /// Delay before the next departure given `backlog` queued calls
    ///
    /// Above the backlog threshold the spacing stretches in proportion to the
    /// queue depth, bounded by the reactive ceiling.
    pub fn next_delay(&self, backlog: usize) -> Duration {
        let spacing = self.current_spacing();
        let threshold = self.config.backlog_threshold.max(1);
        if backlog <= threshold {
            return spacing;
        }

        let ceiling = self.config.max_reactive_spacing().max(spacing);
        let stretched = spacing.mul_f64(backlog as f64 / threshold as f64);
        debug!(backlog, "Queue backlog stretching spacing to {:?}", stretched.min(ceiling));
        stretched.min(ceiling)
    }
}

fn div_ceil(numerator: u64, denominator: u64) -> u64 {
    numerator.div_ceil(denominator.max(1))
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
