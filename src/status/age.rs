//! Age formatting
//!
//! Renders durations the way kubectl prints the AGE column.

use chrono::{DateTime, Duration, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

/// Placeholder for objects without a usable timestamp
pub const UNKNOWN_AGE: &str = "<unknown>";

/// Convert a Kubernetes timestamp into a chrono UTC time
pub fn to_utc(time: &Time) -> Option<DateTime<Utc>> {
    // Wire form is RFC 3339 regardless of k8s-openapi's time backend
    let value = serde_json::to_value(time).ok()?;
    DateTime::parse_from_rfc3339(value.as_str()?)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Age of a timestamp relative to `now`, or `<unknown>`
pub fn age_since(time: Option<&Time>, now: DateTime<Utc>) -> String {
    time.and_then(to_utc)
        .map(|at| human_duration(now - at))
        .unwrap_or_else(|| UNKNOWN_AGE.to_string())
}

/// Format a duration with kubectl's human readable thresholds
///
/// Precision drops as the duration grows: seconds below two minutes,
/// minutes and seconds below ten minutes, and so on up to years.
pub fn human_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds();
    if seconds < -1 {
        return "<invalid>".to_string();
    }
    if seconds < 0 {
        return "0s".to_string();
    }
    if seconds < 60 * 2 {
        return format!("{}s", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 10 {
        let s = seconds % 60;
        return if s == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m{}s", minutes, s)
        };
    }
    if minutes < 60 * 3 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 8 {
        let m = minutes % 60;
        return if m == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h{}m", hours, m)
        };
    }
    if hours < 48 {
        return format!("{}h", hours);
    }
    if hours < 24 * 8 {
        let h = hours % 24;
        return if h == 0 {
            format!("{}d", hours / 24)
        } else {
            format!("{}d{}h", hours / 24, h)
        };
    }
    if hours < 24 * 365 * 2 {
        return format!("{}d", hours / 24);
    }
    if hours < 24 * 365 * 8 {
        let days = hours / 24;
        let dy = days % 365;
        return if dy == 0 {
            format!("{}y", days / 365)
        } else {
            format!("{}y{}d", days / 365, dy)
        };
    }
    format!("{}y", hours / 24 / 365)
}
