//! Per-sample blank values from matched logfile runs.
//!
//! The blank of a dbs row is the mean `increments` value of its run's
//! readings taken at or after `usefrom` minutes.

use crate::constants::{BLANK_COLUMN, LOGFILE_ILOC_COLUMN};
use crate::error::{KoolstofError, Result};
use crate::models::LogfileRun;
use polars::prelude::*;
use tracing::warn;

fn check_usefrom(usefrom: f64) -> Result<()> {
    if usefrom.is_nan() || usefrom <= 0.0 {
        return Err(KoolstofError::InvalidCutoff { usefrom });
    }
    Ok(())
}

/// Blank value for each match; unmatched rows stay `None`
pub fn blanks_from_matches(
    matches: &[Option<usize>],
    runs: &[LogfileRun],
    usefrom: f64,
) -> Result<Vec<Option<f64>>> {
    check_usefrom(usefrom)?;

    matches
        .iter()
        .enumerate()
        .map(|(row, matched)| {
            let Some(iloc) = *matched else {
                return Ok(None);
            };
            let run = runs.get(iloc).ok_or(KoolstofError::MatchOutOfRange {
                row,
                iloc,
                runs: runs.len(),
            })?;

            let blank = run.table.blank(usefrom);
            if blank.is_none() {
                warn!(
                    "Run '{}' at logfile line {} has no increments from minute {}",
                    run.bottle, run.logfileline, usefrom
                );
            }
            Ok(blank)
        })
        .collect()
}

/// Add a nullable `blank_here` column to a dbs frame that has already been
/// matched against `runs`
pub fn get_blanks(
    dbs: &mut DataFrame,
    runs: &[LogfileRun],
    usefrom: f64,
) -> Result<Vec<Option<f64>>> {
    if dbs.get_column_index(LOGFILE_ILOC_COLUMN).is_none() {
        return Err(KoolstofError::MatchesMissing);
    }

    let ilocs = dbs.column(LOGFILE_ILOC_COLUMN)?.cast(&DataType::Int64)?;
    let matches: Vec<Option<usize>> = ilocs
        .i64()?
        .into_iter()
        .map(|iloc| iloc.map(|i| usize::try_from(i).unwrap_or(usize::MAX)))
        .collect();

    let blanks = blanks_from_matches(&matches, runs, usefrom)?;
    dbs.with_column(Series::new(BLANK_COLUMN.into(), blanks.clone()))?;

    Ok(blanks)
}
