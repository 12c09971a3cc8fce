//! Display formatting for timestamps
//!
//! Views render times as `DD Mon YY HH:MM TZ`, e.g. `02 Jan 06 15:04 UTC`.
//! Consumers parse this layout, so it must not change.

use chrono::{DateTime, Utc};

pub const DISPLAY_TIME_FORMAT: &str = "%d %b %y %H:%M %Z";

pub fn format_display_time(at: &DateTime<Utc>) -> String {
    at.format(DISPLAY_TIME_FORMAT).to_string()
}

/// Unset timestamps render as an empty string.
pub fn format_optional_display_time(at: Option<DateTime<Utc>>) -> String {
    at.as_ref().map(format_display_time).unwrap_or_default()
}

/// Whether `at` is an unset placeholder rather than a real instant.
///
/// Both `DateTime::<Utc>::default()` (the Unix epoch, `1970-01-01T00:00:00Z`)
/// and `DateTime::<Utc>::MIN_UTC` count as unset, so a login recorded at
/// exactly the epoch is rejected.
pub fn is_unset_time(at: &DateTime<Utc>) -> bool {
    *at == DateTime::<Utc>::default() || *at == DateTime::<Utc>::MIN_UTC
}
