//! Calendar timestamp parsing and numeric date conversion.
//!
//! Numeric dates (`datenum`) are floating-point days since
//! 1970-01-01T00:00:00, so sub-second offsets can be added arithmetically.
//! Calendar timestamps are stored in frames as `Datetime(Microseconds)`.

use crate::constants::{CENTURY, MICROSECONDS_PER_DAY};
use crate::error::{KoolstofError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

/// Four-digit-year date layouts accepted in dbs files
const DBS_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

const DBS_TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

const LI7000_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Convert a calendar timestamp to days since the Unix epoch
pub fn datenum(datetime: NaiveDateTime) -> f64 {
    datetime.and_utc().timestamp_micros() as f64 / MICROSECONDS_PER_DAY
}

/// Convert days since the Unix epoch back to a calendar timestamp,
/// rounded to the nearest microsecond
pub fn from_datenum(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let micros = (days * MICROSECONDS_PER_DAY).round() as i64;
    DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
}

/// Build a calendar timestamp from the two-digit-year fields of a
/// VINDTA `MM/DD/YY  HH:MM` stamp
pub fn two_digit_year_datetime(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(CENTURY + year as i32, month, day)?.and_hms_opt(hour, minute, 0)
}

fn parse_dbs_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    let parts: Vec<&str> = date.split('/').collect();
    if let [month, day, year] = parts.as_slice() {
        if year.len() == 2 {
            return NaiveDate::from_ymd_opt(
                CENTURY + year.parse::<i32>().ok()?,
                month.parse().ok()?,
                day.parse().ok()?,
            );
        }
    }

    DBS_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}

fn parse_dbs_time(time: &str) -> Option<NaiveTime> {
    DBS_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time.trim(), fmt).ok())
}

/// Combine the `date` and `time` fields of a dbs row into one timestamp.
///
/// `MM/DD/YY` dates are always read as `20YY`.
pub fn parse_dbs_datetime(date: &str, time: &str) -> Result<NaiveDateTime> {
    let day = parse_dbs_date(date).ok_or_else(|| KoolstofError::DateTimeParsing {
        value: date.to_string(),
        reason: "expected MM/DD/YY, MM/DD/YYYY or YYYY-MM-DD".to_string(),
    })?;
    let clock = parse_dbs_time(time).ok_or_else(|| KoolstofError::DateTimeParsing {
        value: time.to_string(),
        reason: "expected HH:MM:SS or HH:MM".to_string(),
    })?;
    Ok(day.and_time(clock))
}

/// Parse the `Time` field of an LI-7000 record
pub fn parse_li7000_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    LI7000_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| KoolstofError::DateTimeParsing {
            value: value.to_string(),
            reason: "expected a date and time such as 2019-05-14 10:23:45".to_string(),
        })
}

/// Build a `Datetime(Microseconds)` series
pub fn datetime_series(name: &str, values: &[Option<NaiveDateTime>]) -> Result<Series> {
    let micros: Vec<Option<i64>> = values
        .iter()
        .map(|value| value.map(|dt| dt.and_utc().timestamp_micros()))
        .collect();
    let series = Series::new(name.into(), micros)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    Ok(series)
}

/// Read a datetime column back as calendar timestamps
pub fn column_datetimes(frame: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDateTime>>> {
    let micros = frame
        .column(name)?
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        .cast(&DataType::Int64)?;
    let values = micros
        .i64()?
        .into_iter()
        .map(|value| {
            value
                .and_then(DateTime::from_timestamp_micros)
                .map(|dt| dt.naive_utc())
        })
        .collect();
    Ok(values)
}
