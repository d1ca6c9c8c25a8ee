//! Transaction timestamp normalization.
//!
//! Records carry their update time as `YYYY.MM.DD.hh.mm.ss.000` in UTC. The
//! ledger is consulted for whole seconds only, so the millisecond field is
//! always `000` and strings sort in time order.

use chrono::{DateTime, Datelike};

use crate::types::TxTimestamp;

/// Value written when the transaction time can't be obtained.
///
/// This is a fixed wire value consumed downstream; it does not share the
/// field layout of a real timestamp and must not be reformatted.
pub const SENTINEL_TIMESTAMP: &str = "0000.00.00.00.00.000";

const FORMAT: &str = "%Y.%m.%d.%H.%M.%S.000";

/// Years a ledger timestamp can express.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Format whole seconds since the Unix epoch.
///
/// Returns `None` outside years 0001 through 9999, so every result has the
/// same width.
pub fn format_seconds(seconds: i64) -> Option<String> {
    DateTime::from_timestamp(seconds, 0)
        .filter(|dt| YEAR_RANGE.contains(&dt.year()))
        .map(|dt| dt.format(FORMAT).to_string())
}

/// Normalize the outcome of a ledger timestamp lookup.
///
/// Any failure, including an out-of-range instant, yields
/// [`SENTINEL_TIMESTAMP`] instead of an error.
pub fn normalize<E>(raw: Result<TxTimestamp, E>) -> String {
    raw.ok()
        .and_then(|ts| format_seconds(ts.seconds))
        .unwrap_or_else(|| SENTINEL_TIMESTAMP.to_string())
}
