//! Quota header parsing

use super::types::{QuotaSnapshot, RateLimitDetails};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use std::time::Duration;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";
pub const RETRY_AFTER_HEADER: &str = "retry-after";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}

/// Quota snapshot, present only when both limit and remaining are reported
pub fn parse_quota(headers: &HeaderMap) -> Option<QuotaSnapshot> {
    let limit = header_str(headers, LIMIT_HEADER)?.parse::<u32>().ok()?;
    let remaining = header_str(headers, REMAINING_HEADER)?.parse::<u32>().ok()?;
    let reset_epoch_secs = header_str(headers, RESET_HEADER)
        .and_then(|v| v.parse::<f64>().ok())
        .map(|v| v.ceil() as i64);

    Some(QuotaSnapshot {
        limit,
        remaining,
        reset_epoch_secs,
    })
}

/// `retry-after` as either delta-seconds or an HTTP date
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let raw = header_str(headers, RETRY_AFTER_HEADER)?;
    parse_retry_after_value(raw, Utc::now())
}

pub(crate) fn parse_retry_after_value(raw: &str, now: DateTime<Utc>) -> Option<Duration> {
    if let Ok(secs) = raw.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }

    let at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    let delta = (at - now).num_milliseconds().max(0) as u64;
    Some(Duration::from_millis(delta))
}

pub fn rate_limit_details(headers: &HeaderMap) -> RateLimitDetails {
    RateLimitDetails {
        quota: parse_quota(headers),
        retry_after: parse_retry_after(headers),
    }
}
