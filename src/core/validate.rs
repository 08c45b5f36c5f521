use crate::domain::model::{InvalidRow, LogRecord, Outcome, RawRow};
use regex::Regex;
use std::sync::LazyLock;

pub const FIELD_URL: &str = "URL";
pub const FIELD_IP: &str = "IP";
pub const FIELD_TIMESTAMP: &str = "timeStamp";
pub const FIELD_TIME_SPENT: &str = "timeSpent";

/// http/https URL with a dotted hostname (2-6 letter top label, optional
/// trailing dot), `localhost`, or a dotted-quad host; optional port;
/// optional path starting with `/` or `?`. Path contents are
/// unconstrained past the first character.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:https?)://(?:(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,6}\.?|localhost|\d{1,3}(?:\.\d{1,3}){3})(?::\d+)?(?:[/?].*)?$",
    )
    .expect("invalid URL regex")
});

/// Four dot-separated octets, each 0-255, no leading zeros.
static IP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)(?:\.(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)){3}$")
        .expect("invalid IP regex")
});

/// Exact `YYYY-MM-DDTHH:MM:SSZ` shape. Digit groups only; no calendar
/// check, so month 13 passes by contract.
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").expect("invalid timestamp regex")
});

pub fn is_valid_url(raw: &str) -> bool {
    URL_REGEX.is_match(raw)
}

pub fn is_valid_ip(raw: &str) -> bool {
    IP_REGEX.is_match(raw)
}

pub fn is_valid_timestamp(raw: &str) -> bool {
    TIMESTAMP_REGEX.is_match(raw)
}

/// Parseability only. The contract accepts negative values; tightening
/// it to non-negative would change which rows the pipeline rejects.
pub fn is_valid_time_spent(raw: &str) -> bool {
    raw.parse::<i64>().is_ok()
}

/// Validate one row at its 1-based data-row position.
///
/// Every field contract is evaluated unconditionally, never
/// short-circuited, so the error list is complete for the row. Errors
/// keep a fixed field order: URL, IP, timeStamp, timeSpent.
pub fn validate_row(row: &RawRow, position: usize) -> Outcome {
    let url = row.get(FIELD_URL);
    let ip = row.get(FIELD_IP);
    let time_stamp = row.get(FIELD_TIMESTAMP);
    let time_spent = row.get(FIELD_TIME_SPENT);

    let mut errors = Vec::new();

    if !is_valid_url(url) {
        errors.push(format!("invalid URL: '{}'", url));
    }
    if !is_valid_ip(ip) {
        errors.push(format!("invalid IP address: '{}'", ip));
    }
    if !is_valid_timestamp(time_stamp) {
        errors.push(format!("invalid timestamp: '{}'", time_stamp));
    }
    if !is_valid_time_spent(time_spent) {
        errors.push(format!("timeSpent is not an integer: '{}'", time_spent));
    }

    if errors.is_empty() {
        // timeSpent parseability was just checked above.
        let time_spent = time_spent.parse::<i64>().unwrap_or_default();
        Outcome::Valid(LogRecord {
            url: url.to_string(),
            ip: ip.to_string(),
            time_stamp: time_stamp.to_string(),
            time_spent,
        })
    } else {
        Outcome::Invalid(InvalidRow {
            row: position,
            fields: row.fields.clone(),
            errors,
        })
    }
}
