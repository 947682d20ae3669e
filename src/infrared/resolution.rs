//! Sub-second timestamp recovery for LI-7000 records.
//!
//! The LI-7000 logs several readings per second but stamps them to the
//! whole second. The sampling rate is the number of rows per distinct
//! timestamp, counted over the interior seconds only: the first and last
//! seconds of a file are usually partial. Rows are then spread evenly
//! across their second, `0, 1/rate, ..., (rate-1)/rate`, with the partial
//! head second taking the tail end of that sequence and the partial last
//! second its start.

use crate::constants::{DATENUM_COLUMN, DATETIME_COLUMN, SECONDS_PER_DAY};
use crate::error::{KoolstofError, Result};
use crate::frame::column_f64;
use crate::timestamps::{datetime_series, from_datenum};
use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::{debug, warn};

/// Inferred sampling rate and the second offset of every row
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub rate_hz: usize,
    /// Offset in seconds to add to each row's timestamp
    pub fractions: Vec<f64>,
}

/// Row counts of consecutive equal values
fn second_lengths(datenum: &[f64]) -> Vec<usize> {
    let mut lengths: Vec<usize> = Vec::new();
    let mut previous: Option<f64> = None;

    for &value in datenum {
        if previous == Some(value) {
            if let Some(n) = lengths.last_mut() {
                *n += 1;
            }
        } else {
            lengths.push(1);
        }
        previous = Some(value);
    }
    lengths
}

/// Infer the sampling rate of a time-sorted `datenum` sequence and the
/// sub-second offsets that spread repeated timestamps across their second
pub fn second_fractions(datenum: &[f64]) -> Result<Resolution> {
    let seconds = second_lengths(datenum);
    if seconds.len() < 3 {
        return Err(KoolstofError::SamplingRate {
            reason: format!(
                "need at least three distinct timestamps, found {}",
                seconds.len()
            ),
        });
    }

    let interior = &seconds[1..seconds.len() - 1];
    let interior_rows: usize = interior.iter().sum();
    if interior_rows % interior.len() != 0 {
        return Err(KoolstofError::SamplingRate {
            reason: format!(
                "{} rows over {} interior seconds is not a whole number per second",
                interior_rows,
                interior.len()
            ),
        });
    }
    let rate = interior_rows / interior.len();

    let uneven = interior.iter().filter(|&&n| n != rate).count();
    if uneven > 0 {
        warn!(
            "{} of {} interior seconds do not hold {} rows; offsets may drift",
            uneven,
            interior.len(),
            rate
        );
    }

    let head = seconds[0];
    let tail = seconds[seconds.len() - 1];
    if head > rate || tail > rate {
        return Err(KoolstofError::SamplingRate {
            reason: format!(
                "first or last second holds more rows ({} / {}) than the {} Hz rate",
                head, tail, rate
            ),
        });
    }

    let cycle: Vec<f64> = (0..rate).map(|i| i as f64 / rate as f64).collect();
    let mut fractions = Vec::with_capacity(datenum.len());
    fractions.extend_from_slice(&cycle[rate - head..]);
    fractions.extend(cycle.iter().cycle().take(interior_rows));
    fractions.extend_from_slice(&cycle[..tail]);

    Ok(Resolution {
        rate_hz: rate,
        fractions,
    })
}

/// Add sub-second offsets to `datenum` and rebuild `datetime` from it.
///
/// Returns the inferred sampling rate in Hz.
pub fn correct_resolution(frame: &mut DataFrame) -> Result<usize> {
    let datenums: Vec<f64> = column_f64(frame, DATENUM_COLUMN)?
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect();
    let resolution = second_fractions(&datenums)?;

    let corrected: Vec<f64> = datenums
        .iter()
        .zip(&resolution.fractions)
        .map(|(days, seconds)| days + seconds / SECONDS_PER_DAY)
        .collect();
    let datetimes: Vec<Option<NaiveDateTime>> =
        corrected.iter().map(|&days| from_datenum(days)).collect();

    frame.with_column(Series::new(DATENUM_COLUMN.into(), corrected))?;
    frame.with_column(datetime_series(DATETIME_COLUMN, &datetimes)?)?;

    debug!("Inferred {} Hz sampling over {} rows", resolution.rate_hz, frame.height());
    Ok(resolution.rate_hz)
}
