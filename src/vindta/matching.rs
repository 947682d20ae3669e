//! Matching dbs rows to logfile runs.
//!
//! A dbs row is matched on equal bottle name and equal analysis time. Rows
//! whose bottle never appears in the logfile are left unmatched (typically
//! runs that are planned but not yet done). When the bottle does appear,
//! exactly one run must share both the name and the time.

use crate::constants::{ANALYSISDATE_COLUMN, BOTTLE_COLUMN, LOGFILE_ILOC_COLUMN};
use crate::error::{KoolstofError, Result};
use crate::frame::column_strings;
use crate::models::LogfileRun;
use crate::timestamps::column_datetimes;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::info;

/// Sample identifier and analysis time of one dbs row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestKey {
    pub bottle: Option<String>,
    pub analysisdate: Option<NaiveDateTime>,
}

impl ManifestKey {
    pub fn new(bottle: impl Into<String>, analysisdate: NaiveDateTime) -> Self {
        Self {
            bottle: Some(bottle.into()),
            analysisdate: Some(analysisdate),
        }
    }
}

/// Position in `runs` of the run matching each key, or `None` when the
/// key's bottle is absent from the logfile
pub fn find_logfile_matches(
    keys: &[ManifestKey],
    runs: &[LogfileRun],
) -> Result<Vec<Option<usize>>> {
    let logged: HashSet<&str> = runs.iter().map(|run| run.bottle.as_str()).collect();

    keys.iter()
        .enumerate()
        .map(|(row, key)| {
            let Some(bottle) = key.bottle.as_deref().filter(|b| logged.contains(b)) else {
                return Ok(None);
            };

            let found: Vec<usize> = runs
                .iter()
                .enumerate()
                .filter(|(_, run)| run.bottle == bottle && Some(run.analysisdate) == key.analysisdate)
                .map(|(iloc, _)| iloc)
                .collect();

            match found.as_slice() {
                [iloc] => Ok(Some(*iloc)),
                _ => Err(KoolstofError::AmbiguousMatch {
                    row,
                    bottle: bottle.to_string(),
                    matches: found.len(),
                }),
            }
        })
        .collect()
}

/// Bottle and analysis time of every dbs row
pub fn manifest_keys(dbs: &DataFrame) -> Result<Vec<ManifestKey>> {
    let bottles = column_strings(dbs, BOTTLE_COLUMN)?;
    let dates = column_datetimes(dbs, ANALYSISDATE_COLUMN)?;

    Ok(bottles
        .into_iter()
        .zip(dates)
        .map(|(bottle, analysisdate)| ManifestKey {
            bottle,
            analysisdate,
        })
        .collect())
}

/// Add a nullable `logfile_iloc` column to `dbs` pointing into `runs`
pub fn match_dbs_to_logfile(dbs: &mut DataFrame, runs: &[LogfileRun]) -> Result<Vec<Option<usize>>> {
    let keys = manifest_keys(dbs)?;
    let matches = find_logfile_matches(&keys, runs)?;

    let ilocs: Vec<Option<u64>> = matches.iter().map(|m| m.map(|iloc| iloc as u64)).collect();
    dbs.with_column(Series::new(LOGFILE_ILOC_COLUMN.into(), ilocs))?;

    info!(
        "Matched {} of {} dbs rows to {} logfile runs",
        matches.iter().flatten().count(),
        matches.len(),
        runs.len()
    );

    Ok(matches)
}
