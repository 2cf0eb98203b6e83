//! Identifier and timestamp helpers

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Custom epoch: 2024-01-01 00:00:00 UTC
const EPOCH_MS: i64 = 1_704_067_200_000;

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);
static LAST_STAMP_MS: AtomicI64 = AtomicI64::new(0);

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style id.
///
/// Layout (63 bits):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 10 bits: per-process sequence (1024 ids per ms before wrapping)
///   - 12 bits: random
pub fn snowflake_id() -> u64 {
    use rand::Rng;
    let ts = ((now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF) as u64;
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0x3FF;
    let rand_bits: u64 = rand::thread_rng().gen_range(0..0x1000);
    (ts << 22) | (seq << 12) | rand_bits
}

/// Short opaque record id: a snowflake id in base 36 (at most 13 chars).
pub fn new_id() -> String {
    to_base36(snowflake_id())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    buf.iter().rev().collect()
}

/// Current UTC time as ISO-8601 (`2025-11-10T12:00:00.000Z`).
///
/// Strictly increasing within the process: a call landing on the same
/// millisecond as the previous one is pushed 1ms forward.
pub fn now_iso() -> String {
    let now = now_millis();
    let mut prev = LAST_STAMP_MS.load(Ordering::Relaxed);
    let stamp = loop {
        let next = now.max(prev + 1);
        match LAST_STAMP_MS.compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => break next,
            Err(actual) => prev = actual,
        }
    };
    format_iso(stamp)
}

/// Format epoch milliseconds the way [`now_iso`] does
pub fn format_iso(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
