//! Display helpers for reservation data. Timestamps from the backend are naive UTC ISO
//! strings and are shown as-is, without conversion to a local zone.

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const NOT_AVAILABLE: &str = "N/A";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Parse either an RFC 3339 timestamp or the backend's naive `isoformat()` output.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

fn format_with(s: Option<&str>, fmt: &str) -> String {
    match s.and_then(parse_timestamp) {
        Some(dt) => dt.format(fmt).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// "5 Mar 2024, 09:07 am"
pub fn format_datetime(s: Option<&str>) -> String { format_with(s, "%-d %b %Y, %I:%M %P") }

/// "5 March 2024"
pub fn format_date(s: Option<&str>) -> String { format_with(s, "%-d %B %Y") }

/// "09:07 am"
pub fn format_time(s: Option<&str>) -> String { format_with(s, "%I:%M %P") }

/// Elapsed time between two timestamps; an open reservation runs until now.
pub fn format_duration(start: Option<&str>, end: Option<&str>) -> String {
    format_duration_at(start, end, Utc::now().naive_utc())
}

pub fn format_duration_at(start: Option<&str>, end: Option<&str>, now: NaiveDateTime) -> String {
    let Some(start) = start.and_then(parse_timestamp) else { return NOT_AVAILABLE.to_string() };
    let end = end.and_then(parse_timestamp).unwrap_or(now);
    let mins = (end - start).num_minutes().max(0);
    let (hours, minutes) = (mins / 60, mins % 60);
    if hours > 0 { format!("{}h {}m", hours, minutes) } else { format!("{}m", minutes) }
}

pub fn format_currency(amount: Option<f64>) -> String {
    format!("₹{:.2}", amount.filter(|a| a.is_finite()).unwrap_or(0.0))
}

/// Badge class for reservation and export job statuses.
pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "active" | "done" => "bg-success",
        "cancelled" | "failed" => "bg-danger",
        "pending" => "bg-warning",
        "processing" => "bg-info",
        _ => "bg-secondary",
    }
}

pub fn occupancy_class(rate: f64) -> &'static str {
    if rate >= 90.0 {
        "text-danger"
    } else if rate >= 70.0 {
        "text-warning"
    } else {
        "text-success"
    }
}

pub fn is_valid_email(email: &str) -> bool { EMAIL_RE.is_match(email) }
