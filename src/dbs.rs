//! dbs run manifest reading.
//!
//! The dbs file is the tab-delimited run table kept by the Marianda
//! instrument software, one row per planned or completed analysis. Vendor
//! headers are renamed to a fixed vocabulary and each row gets a combined
//! `analysisdate` timestamp plus its numeric `datenum`.

use crate::config::KoolstofConfig;
use crate::constants::{
    ANALYSISDATE_COLUMN, BOTTLE_COLUMN, DATE_COLUMN, DATENUM_COLUMN, DBS_COLUMN_MAP,
    FILEPATH_COLUMN, TIME_COLUMN,
};
use crate::error::Result;
use crate::frame::{
    column_strings, drop_blank_columns, read_tab_delimited, rename_columns, require_column,
};
use crate::timestamps::{datenum, datetime_series, parse_dbs_datetime};
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Import a dbs file as a frame
pub fn read_dbs(path: &Path, config: &KoolstofConfig) -> Result<DataFrame> {
    let mut dbs = read_tab_delimited(
        path,
        0,
        Some(config.dbs_null_value.as_str()),
        &[BOTTLE_COLUMN, DATE_COLUMN, TIME_COLUMN],
    )?;
    rename_columns(&mut dbs, DBS_COLUMN_MAP)?;

    let dropped = drop_blank_columns(&mut dbs)?;
    if !dropped.is_empty() {
        debug!("Dropped empty columns {:?} from {}", dropped, path.display());
    }

    require_column(&dbs, DATE_COLUMN, path)?;
    require_column(&dbs, TIME_COLUMN, path)?;

    let filepath = path.display().to_string();
    let filepaths = vec![filepath; dbs.height()];
    dbs.with_column(Series::new(FILEPATH_COLUMN.into(), filepaths))?;

    let analysisdates = analysisdates(&dbs)?;
    let datenums: Vec<Option<f64>> = analysisdates.iter().map(|dt| dt.map(datenum)).collect();
    dbs.with_column(datetime_series(ANALYSISDATE_COLUMN, &analysisdates)?)?;
    dbs.with_column(Series::new(DATENUM_COLUMN.into(), datenums))?;

    debug!("Read {} dbs rows from {}", dbs.height(), path.display());
    Ok(dbs)
}

/// Combine `date` and `time`; rows missing either stay empty
fn analysisdates(dbs: &DataFrame) -> Result<Vec<Option<NaiveDateTime>>> {
    let dates = column_strings(dbs, DATE_COLUMN)?;
    let times = column_strings(dbs, TIME_COLUMN)?;

    dates
        .iter()
        .zip(&times)
        .map(|(date, time)| match (date, time) {
            (Some(date), Some(time)) => parse_dbs_datetime(date, time).map(Some),
            _ => Ok(None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KoolstofError;
    use crate::frame::column_f64;
    use crate::timestamps::column_datetimes;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_dbs(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_read_dbs() {
        let temp_file = write_dbs(&[
            "run type\tbottle\tdate\ttime\tCT\tCRM batch\tsample mass\t",
            "sample\tSTD1\t05/14/19\t10:23\t2100.5\t189\t100.1\t",
            "CRM\tCRM189\t05/14/19\t10:41\t2010.2\t189\tnone\t",
        ]);

        let dbs = read_dbs(temp_file.path(), &KoolstofConfig::default()).unwrap();

        assert_eq!(dbs.height(), 2);
        for column in ["run_type", "dic", "lastcrm_batch", "mass_sample", "filepath"] {
            assert!(dbs.get_column_index(column).is_some(), "missing {}", column);
        }
        assert!(dbs.get_column_index("CT").is_none());

        assert_eq!(
            column_strings(&dbs, FILEPATH_COLUMN).unwrap()[0],
            Some(temp_file.path().display().to_string())
        );
        assert_eq!(column_f64(&dbs, "mass_sample").unwrap()[1], None);

        let first = NaiveDate::from_ymd_opt(2019, 5, 14)
            .unwrap()
            .and_hms_opt(10, 23, 0)
            .unwrap();
        assert_eq!(column_datetimes(&dbs, ANALYSISDATE_COLUMN).unwrap()[0], Some(first));
        assert_eq!(column_f64(&dbs, DATENUM_COLUMN).unwrap()[0], Some(datenum(first)));
    }

    #[test]
    fn test_trailing_tab_column_is_dropped() {
        let temp_file = write_dbs(&["bottle\tdate\ttime\t", "A\t05/14/19\t10:23\t"]);
        let dbs = read_dbs(temp_file.path(), &KoolstofConfig::default()).unwrap();

        // bottle, date, time, filepath, analysisdate, datenum
        assert_eq!(dbs.width(), 6);
    }

    #[test]
    fn test_latin1_header_is_renamed() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"bottle\tdate\ttime\tCV (\xB5mol)\t\nA\t05/14/19\t10:23\t1.25\t\n")
            .unwrap();

        let dbs = read_dbs(temp_file.path(), &KoolstofConfig::default()).unwrap();
        assert_eq!(column_f64(&dbs, "cv_micromol").unwrap(), vec![Some(1.25)]);
    }

    #[test]
    fn test_numeric_looking_bottle_stays_text() {
        let temp_file = write_dbs(&["bottle\tdate\ttime", "007\t05/14/19\t10:23"]);
        let dbs = read_dbs(temp_file.path(), &KoolstofConfig::default()).unwrap();

        assert_eq!(
            column_strings(&dbs, BOTTLE_COLUMN).unwrap(),
            vec![Some("007".to_string())]
        );
    }

    #[test]
    fn test_missing_time_column_is_fatal() {
        let temp_file = write_dbs(&["bottle\tdate", "A\t05/14/19"]);
        assert!(matches!(
            read_dbs(temp_file.path(), &KoolstofConfig::default()),
            Err(KoolstofError::MissingColumn { column, .. }) if column == "time"
        ));
    }

    #[test]
    fn test_unreadable_date_is_fatal() {
        let temp_file = write_dbs(&["bottle\tdate\ttime", "A\tsoon\t10:23"]);
        assert!(matches!(
            read_dbs(temp_file.path(), &KoolstofConfig::default()),
            Err(KoolstofError::DateTimeParsing { .. })
        ));
    }
}
