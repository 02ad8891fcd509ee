use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use regex::Regex;

use crate::error::ConfigError;

fn day_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2})-(\d{2})(?:-(\d{4}))?$").expect("static regex"))
}

// Parse "DD-MM" or "DD-MM-YYYY". A missing year means the year of `today`.
pub fn parse_day_str(s: &str, today: NaiveDate) -> Result<NaiveDate, ConfigError> {
    let invalid = || ConfigError::InvalidDate(s.to_string());
    let caps = day_pattern().captures(s.trim()).ok_or_else(invalid)?;
    let day: u32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    let year: i32 = match caps.get(3) {
        Some(y) => y.as_str().parse().map_err(|_| invalid())?,
        None => today.year(),
    };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

// Helper for Option<String> inputs used by the --date flag
pub fn parse_day_opt(s: &Option<String>, offset: FixedOffset) -> Result<NaiveDate, ConfigError> {
    let today = today_at(offset);
    match s.as_deref() {
        Some(s) => parse_day_str(s, today),
        None => Ok(today),
    }
}

pub fn today_at(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

pub fn offset_from_hours(hours: i32) -> Result<FixedOffset, ConfigError> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or(ConfigError::InvalidOffset(hours))
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%d-%m-%Y").to_string()
}

/// One local calendar day as a half-open UTC interval `[from, to)`.
///
/// `from` is midnight of the day at the given offset, so the feed query
/// covers what the deployment considers "that day".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DateWindow {
    pub fn for_day(day: NaiveDate, offset: FixedOffset) -> Self {
        let midnight = DateTime::<Utc>::from_naive_utc_and_offset(day.and_time(NaiveTime::default()), Utc);
        let from = midnight - Duration::seconds(offset.local_minus_utc() as i64);
        DateWindow { from, to: from + Duration::hours(24) }
    }

    pub fn from(&self) -> DateTime<Utc> { self.from }
    pub fn to(&self) -> DateTime<Utc> { self.to }

    pub fn from_millis(&self) -> i64 { self.from.timestamp_millis() }
    pub fn to_millis(&self) -> i64 { self.to.timestamp_millis() }
}
