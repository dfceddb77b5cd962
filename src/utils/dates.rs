//! Date parsing and formatting
//!
//! Dates are displayed the way a US-English locale would print them, e.g. `5/1/2024, 2:30:00 PM`.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const FORM_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A deadline typed in the task form, converted to the two shapes the server expects
#[derive(Clone, Debug, PartialEq)]
pub struct FormDeadline {
    /// UTC, ISO-8601 with milliseconds
    pub event_date: String,
    /// Human-readable, in the user's timezone
    pub display_date: String,
}

/// Format an RFC 3339 timestamp for display in the local timezone
pub fn format_display_date(raw: &str) -> Option<String> {
    format_display_date_in(raw, &Local)
}

pub fn format_display_date_in<Tz>(raw: &str, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(raw) {
        Err(err) => {
            log::debug!("Unable to parse date {:?}: {}", raw, err);
            None
        },
        Ok(dt) => Some(dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string()),
    }
}

/// Parse a deadline as typed in a `datetime-local` input (`YYYY-MM-DDTHH:MM`), in the local timezone
pub fn parse_form_deadline(input: &str) -> Result<FormDeadline, String> {
    parse_form_deadline_in(input, &Local)
}

pub fn parse_form_deadline_in<Tz>(input: &str, tz: &Tz) -> Result<FormDeadline, String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let input = input.trim();
    let naive = FORM_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| format!("Invalid deadline {:?}", input))?;

    let local = tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("Deadline {:?} does not exist in this timezone", input))?;

    Ok(FormDeadline {
        event_date: local.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        display_date: local.format(DISPLAY_FORMAT).to_string(),
    })
}
