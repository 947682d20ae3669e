//! LI-COR LI-7000 text file reading.

use super::resolution::correct_resolution;
use crate::config::KoolstofConfig;
use crate::constants::{DATENUM_COLUMN, DATETIME_COLUMN, LI7000_COLUMN_MAP, LI7000_TIME_HEADER};
use crate::error::Result;
use crate::frame::{
    column_strings, drop_blank_columns, read_tab_delimited, rename_columns, require_column,
};
use crate::timestamps::{datenum, datetime_series, parse_li7000_datetime};
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Import an LI-7000 text file with sub-second timestamps recovered.
///
/// The preamble above the header row is skipped, vendor headers are
/// renamed (`Time` becomes `datetime`, `CO2B um/m` becomes `x_CO2`, ...),
/// and a `datenum` column is added before the resolution correction.
pub fn read_li7000(path: &Path, config: &KoolstofConfig) -> Result<DataFrame> {
    let mut licor =
        read_tab_delimited(path, config.li7000_skip_rows, None, &[LI7000_TIME_HEADER])?;
    drop_blank_columns(&mut licor)?;
    require_column(&licor, LI7000_TIME_HEADER, path)?;
    rename_columns(&mut licor, LI7000_COLUMN_MAP)?;

    let datetimes: Vec<Option<NaiveDateTime>> = column_strings(&licor, DATETIME_COLUMN)?
        .iter()
        .map(|value| value.as_deref().map(parse_li7000_datetime).transpose())
        .collect::<Result<_>>()?;
    let datenums: Vec<Option<f64>> = datetimes.iter().map(|dt| dt.map(datenum)).collect();

    licor.with_column(datetime_series(DATETIME_COLUMN, &datetimes)?)?;
    licor.with_column(Series::new(DATENUM_COLUMN.into(), datenums))?;

    let rate = correct_resolution(&mut licor)?;
    debug!(
        "Read {} LI-7000 rows at {} Hz from {}",
        licor.height(),
        rate,
        path.display()
    );

    Ok(licor)
}
