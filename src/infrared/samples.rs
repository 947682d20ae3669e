//! Splitting an LI-7000 record into samples using the dbs manifest.
//!
//! Every LI-7000 row belongs to the most recent dbs row whose timestamp it
//! has reached. Rows logged before the first dbs timestamp belong to no
//! sample and are dropped. Both tables are expected in ascending time.

use crate::constants::{DATENUM_COLUMN, DBS_IX_COLUMN};
use crate::error::Result;
use crate::frame::column_f64;
use polars::prelude::*;
use tracing::info;

/// Index of the dbs row each LI-7000 row belongs to.
///
/// Later dbs rows overwrite earlier ones, so a row ends up tagged with the
/// last dbs timestamp it is at or after.
pub fn sample_indices(licor_datenum: &[f64], dbs_datenum: &[f64]) -> Vec<Option<usize>> {
    let mut tags = vec![None; licor_datenum.len()];

    for (dbs_ix, &start) in dbs_datenum.iter().enumerate() {
        for (tag, &t) in tags.iter_mut().zip(licor_datenum) {
            if t >= start {
                *tag = Some(dbs_ix);
            }
        }
    }

    tags
}

/// Tag LI-7000 rows with `dbs_ix` and drop those before the first dbs row
pub fn get_licor_samples(licor: &DataFrame, dbs: &DataFrame) -> Result<DataFrame> {
    let nan_for_null = |values: Vec<Option<f64>>| -> Vec<f64> {
        values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    };
    let licor_times = nan_for_null(column_f64(licor, DATENUM_COLUMN)?);
    let dbs_times = nan_for_null(column_f64(dbs, DATENUM_COLUMN)?);

    let tags: Vec<Option<u64>> = sample_indices(&licor_times, &dbs_times)
        .into_iter()
        .map(|tag| tag.map(|ix| ix as u64))
        .collect();

    let mut tagged = licor.clone();
    tagged.with_column(Series::new(DBS_IX_COLUMN.into(), tags))?;
    let samples = tagged
        .lazy()
        .filter(col(DBS_IX_COLUMN).is_not_null())
        .collect()?;

    info!(
        "Assigned {} of {} LI-7000 rows to {} dbs rows",
        samples.height(),
        licor.height(),
        dbs.height()
    );

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_indices_boundaries() {
        let licor = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
        let dbs = [1.0, 2.0];

        assert_eq!(
            sample_indices(&licor, &dbs),
            vec![None, Some(0), Some(0), Some(1), Some(1), Some(1)]
        );
    }

    #[test]
    fn test_sample_indices_without_dbs() {
        assert_eq!(sample_indices(&[1.0, 2.0], &[]), vec![None, None]);
    }

    #[test]
    fn test_missing_dbs_time_tags_nothing() {
        assert_eq!(
            sample_indices(&[1.0, 2.0], &[f64::NAN, 1.5]),
            vec![None, Some(1)]
        );
    }

    #[test]
    fn test_get_licor_samples_drops_early_rows() {
        let licor = DataFrame::new(vec![
            Column::new(DATENUM_COLUMN.into(), [0.5, 1.0, 1.5, 2.0]),
            Column::new("x_CO2".into(), [400.0, 410.0, 420.0, 430.0]),
        ])
        .unwrap();
        let dbs = DataFrame::new(vec![
            Column::new("bottle".into(), ["A", "B"]),
            Column::new(DATENUM_COLUMN.into(), [1.0, 2.0]),
        ])
        .unwrap();

        let samples = get_licor_samples(&licor, &dbs).unwrap();
        assert_eq!(samples.height(), 3);
        assert_eq!(
            column_f64(&samples, "x_CO2").unwrap(),
            vec![Some(410.0), Some(420.0), Some(430.0)]
        );
        assert_eq!(
            column_f64(&samples, DBS_IX_COLUMN).unwrap(),
            vec![Some(0.0), Some(0.0), Some(1.0)]
        );
    }
}
