//! Date and duration parsing for tool parameters.
//!
//! Dates come back as Unix milliseconds, which is what ClickUp expects.
//! Calendar forms are interpreted in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::mcp::error::{ToolError, ToolResult};

/// Values at or below this are taken as seconds rather than milliseconds.
const SECONDS_CUTOFF: i64 = 10_000_000_000;

/// A date given as Unix milliseconds or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Text(String),
}

impl DateInput {
    /// Resolve to milliseconds, reporting `field` on failure.
    pub fn to_millis(&self, field: &str) -> ToolResult<i64> {
        match self {
            DateInput::Millis(ms) => Ok(normalize_epoch(*ms)),
            DateInput::Text(text) => parse_date(text, Utc::now())
                .map_err(|e| ToolError::invalid_params(format!("{field}: {e}"))),
        }
    }
}

fn normalize_epoch(value: i64) -> i64 {
    if value.abs() <= SECONDS_CUTOFF {
        value * 1000
    } else {
        value
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(now)
}

fn unit_duration(amount: i64, unit: &str) -> Option<TimeDelta> {
    let unit = unit.trim_end_matches('s');
    match unit {
        "min" | "minute" | "m" => TimeDelta::try_minutes(amount),
        "hour" | "hr" | "h" => TimeDelta::try_hours(amount),
        "day" | "d" => TimeDelta::try_days(amount),
        "week" | "wk" | "w" => TimeDelta::try_weeks(amount),
        "month" => amount.checked_mul(30).and_then(TimeDelta::try_days),
        "year" | "yr" => amount.checked_mul(365).and_then(TimeDelta::try_days),
        _ => None,
    }
}

fn is_unit(unit: &str) -> bool {
    unit_duration(0, unit).is_some()
}

/// Shift `now` by `amount` units, forwards or backwards.
fn shift(
    now: DateTime<Utc>,
    amount: &str,
    unit: &str,
    forward: bool,
) -> Option<Result<DateTime<Utc>, String>> {
    let amount: i64 = amount.parse().ok()?;
    if !is_unit(unit) {
        return None;
    }
    let moved = unit_duration(amount, unit).and_then(|delta| {
        if forward {
            now.checked_add_signed(delta)
        } else {
            now.checked_sub_signed(delta)
        }
    });
    Some(moved.ok_or_else(|| format!("date '{amount} {unit}' is out of range")))
}

fn relative(text: &str, now: DateTime<Utc>) -> Option<Result<DateTime<Utc>, String>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    match words.as_slice() {
        ["now"] => Some(Ok(now)),
        ["today"] => Some(Ok(start_of_day(now))),
        ["tomorrow"] => Some(Ok(start_of_day(now) + TimeDelta::days(1))),
        ["yesterday"] => Some(Ok(start_of_day(now) - TimeDelta::days(1))),
        ["next", unit] => shift(now, "1", unit, true),
        ["last", unit] => shift(now, "1", unit, false),
        ["in", amount, unit] => shift(now, amount, unit, true),
        [amount, unit, "ago"] => shift(now, amount, unit, false),
        [amount, unit, "from", "now"] => shift(now, amount, unit, true),
        _ => None,
    }
}

/// Parse a date parameter relative to `now`.
///
/// Accepts Unix milliseconds (or seconds), `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`,
/// RFC 3339, and phrases such as `tomorrow`, `in 3 days`, `2 hours ago`,
/// `3 days from now` and `next week`.
pub fn parse_date(input: &str, now: DateTime<Utc>) -> Result<i64, String> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err("date is empty".to_string());
    }

    if let Ok(number) = raw.parse::<i64>() {
        return Ok(normalize_epoch(number));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive).timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive).timestamp_millis());
        }
    }

    match relative(&raw.to_lowercase(), now) {
        Some(date) => date.map(|date| date.timestamp_millis()),
        None => Err(format!("unrecognised date '{raw}'")),
    }
}

/// Parse a duration into milliseconds.
///
/// Accepts `90m`, `1h 30m`, `1h30m`, `2h`, `45s`, or a bare number of minutes.
pub fn parse_duration(input: &str) -> Result<i64, String> {
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return Err("duration is empty".to_string());
    }
    if let Ok(minutes) = text.parse::<i64>() {
        if minutes <= 0 {
            return Err("duration must be positive".to_string());
        }
        return minutes
            .checked_mul(60_000)
            .ok_or_else(|| format!("duration '{}' is out of range", input.trim()));
    }

    let mut total: i64 = 0;
    let mut chars = text.chars().filter(|c| !c.is_whitespace()).peekable();
    let mut matched = false;
    while chars.peek().is_some() {
        let digits: String = std::iter::from_fn(|| chars.next_if(char::is_ascii_digit)).collect();
        let unit: String =
            std::iter::from_fn(|| chars.next_if(|c| c.is_ascii_alphabetic())).collect();
        let amount: i64 = digits
            .parse()
            .map_err(|_| format!("unrecognised duration '{}'", input.trim()))?;
        let scale: i64 = match unit.as_str() {
            "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
            "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
            "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
            _ => return Err(format!("unrecognised duration '{}'", input.trim())),
        };
        total = amount
            .checked_mul(scale)
            .and_then(|millis| total.checked_add(millis))
            .ok_or_else(|| format!("duration '{}' is out of range", input.trim()))?;
        matched = true;
    }

    if matched && total > 0 {
        Ok(total)
    } else {
        Err(format!("unrecognised duration '{}'", input.trim()))
    }
}
