//! Display helpers shared by table cells and detail pages.

use chrono::{DateTime, Utc};

/// Human-readable distance from `then` to `now`, e.g. `3 days ago`.
///
/// Uses the largest whole unit. Timestamps in the future read `from now`.
#[must_use]
pub fn since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let (seconds, suffix) = if delta.num_seconds() < 0 {
        (-delta.num_seconds(), "from now")
    } else {
        (delta.num_seconds(), "ago")
    };

    const UNITS: [(i64, &str); 7] = [
        (365 * 24 * 3600, "year"),
        (30 * 24 * 3600, "month"),
        (7 * 24 * 3600, "week"),
        (24 * 3600, "day"),
        (3600, "hour"),
        (60, "minute"),
        (1, "second"),
    ];

    let (count, unit) = UNITS
        .iter()
        .find(|(size, _)| seconds >= *size)
        .map_or((0, "second"), |(size, unit)| (seconds / size, *unit));
    let count = count.max(1);
    let plural = if count == 1 { "" } else { "s" };

    format!("{count} {unit}{plural} {suffix}")
}

/// Yes/No label for booleans on detail pages.
#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
