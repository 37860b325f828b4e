use anyhow::{Result, bail};
use std::fmt::Write as _;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};

/// Line prefix format: 24-hour clock, no leading zero on the hour.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %-H:%M:%S";

const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Renders `time` with `format`, falling back to [`DEFAULT_DATE_FORMAT`]
/// when chrono cannot render it.
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", time.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", time.format(DEFAULT_DATE_FORMAT));
    }
    out
}

/// Name of the day file for the calendar date of `time`.
pub fn file_name_for<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("log_{}.txt", time.format(FILE_DATE_FORMAT))
}

/// Rejects formats chrono would fail on while rendering.
pub fn validate_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        bail!("Invalid date format {format:?}");
    }
    Ok(())
}
