use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use chrono_tz::Tz;

/// Render an instant the way history entries and chart labels show it:
/// two-digit day and month, 12-hour clock with the es-VE day-period
/// suffix, in the given timezone.
///
/// ```text
/// 19/10, 02:30 p. m.
/// ```
///
/// The result is for display only and does not sort chronologically.
pub fn format_display(instant: DateTime<Utc>, tz: Tz) -> String {
    let local = instant.with_timezone(&tz);
    let period = if local.hour() < 12 { "a. m." } else { "p. m." };
    format!("{} {period}", local.format("%d/%m, %I:%M"))
}

/// RFC 3339 UTC instant with millisecond precision, used for
/// `Snapshot::last_updated`.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

