//! VINDTA 3C logfile parsing.
//!
//! The logfile interleaves human-readable session banners with run records.
//! A run record starts with a line such as
//!
//! ```text
//! 3C standard.mth run started 05/14/19  10:23
//! bottle	STD1	...
//! ...
//! ...
//! 1	1234	1234	...
//! 2	1890	656	...
//! ```
//!
//! The line after the start names the sample, and tab-separated
//! `minutes counts increments` readings begin four lines below the start.
//! Each start line yields one [`LogfileRun`], in file order.

use crate::config::KoolstofConfig;
use crate::constants::{
    ANALYSISDATE_COLUMN, INCREMENT_OFFSET, OTHER_SAMPLE_LINE, RUN_START_SUFFIX,
};
use crate::error::{KoolstofError, Result};
use crate::models::{Increment, IncrementTable, LogfileRun, SampleLine};
use crate::timestamps::{datetime_series, two_digit_year_datetime};
use chrono::NaiveDateTime;
use polars::prelude::*;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static RUN_DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"started (\d{2})/(\d{2})/(\d{2})  (\d{2}):(\d{2})")
        .expect("Invalid run start time pattern")
});

static BOTTLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(bottle)?\t([^\t]*)\t").expect("Invalid bottle pattern"));

static CRM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CRM\t([^\t]*)\t").expect("Invalid CRM pattern"));

static INCREMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\t(\d+)\t(\d+)\t").expect("Invalid increment pattern")
});

/// Logfile scanner for a fixed set of titration methods
#[derive(Debug, Clone)]
pub struct LogfileParser {
    run_start: Regex,
}

impl LogfileParser {
    /// Compile the run start pattern for `methods`, e.g. `["3C standard"]`
    pub fn new<S: AsRef<str>>(methods: &[S]) -> Result<Self> {
        if methods.is_empty() {
            return Err(KoolstofError::Configuration {
                message: "no titration methods given for logfile parsing".to_string(),
            });
        }

        let alternatives: Vec<String> = methods
            .iter()
            .map(|method| regex::escape(method.as_ref()))
            .collect();
        let run_start = Regex::new(&format!(
            "^({}){}",
            alternatives.join("|"),
            RUN_START_SUFFIX
        ))?;

        Ok(Self { run_start })
    }

    /// Read and parse a logfile (usually `logfile.bak`)
    pub fn read(&self, path: &Path) -> Result<Vec<LogfileRun>> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let runs = self.parse_lines(&text.lines().collect::<Vec<_>>(), path)?;

        debug!("Parsed {} runs from {}", runs.len(), path.display());
        Ok(runs)
    }

    /// Parse logfile contents already held in memory
    pub fn parse_str(&self, text: &str) -> Result<Vec<LogfileRun>> {
        self.parse_lines(&text.lines().collect::<Vec<_>>(), Path::new("<memory>"))
    }

    fn parse_lines(&self, lines: &[&str], source: &Path) -> Result<Vec<LogfileRun>> {
        let mut runs = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let Some(captures) = self.run_start.captures(line) else {
                continue;
            };
            let method = captures[1].to_string();
            let analysisdate = parse_run_start(line, index)?;

            let sample_line = classify_sample_line(lines.get(index + 1).copied());
            let bottle = sample_line.into_bottle(index + 1).ok_or_else(|| {
                KoolstofError::BottleNotFound {
                    path: source.to_path_buf(),
                    line: index + 1,
                }
            })?;

            let table = collect_increments(lines, index + INCREMENT_OFFSET);
            runs.push(LogfileRun::new(index, method, analysisdate, bottle, table));
        }

        Ok(runs)
    }
}

/// Parse `path` with the methods named in `config`
pub fn read_logfile(path: &Path, config: &KoolstofConfig) -> Result<Vec<LogfileRun>> {
    config.validate_methods()?;
    LogfileParser::new(config.methods.as_slice())?.read(path)
}

/// Timestamp of a run start line, `MM/DD/YY  HH:MM` with the year read as 20YY
fn parse_run_start(line: &str, index: usize) -> Result<NaiveDateTime> {
    let invalid = |reason: &str| KoolstofError::InvalidRunTimestamp {
        line: index + 1,
        reason: reason.to_string(),
    };

    let captures = RUN_DATETIME_REGEX
        .captures(line)
        .ok_or_else(|| invalid("no 'started MM/DD/YY  HH:MM' stamp"))?;

    let mut fields = [0u32; 5];
    for (slot, field) in fields.iter_mut().zip(captures.iter().skip(1)) {
        *slot = field
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| invalid("non-numeric date field"))?;
    }
    let [month, day, year, hour, minute] = fields;

    two_digit_year_datetime(year, month, day, hour, minute)
        .ok_or_else(|| invalid("date or time out of range"))
}

/// Decide what kind of sample the line after a run start describes
pub fn classify_sample_line(line: Option<&str>) -> SampleLine {
    let Some(line) = line else {
        return SampleLine::NoMatch;
    };

    if let Some(captures) = BOTTLE_REGEX.captures(line) {
        SampleLine::Bottle(captures[2].to_string())
    } else if let Some(captures) = CRM_REGEX.captures(line) {
        SampleLine::Crm(captures[1].to_string())
    } else if line == OTHER_SAMPLE_LINE {
        SampleLine::Other
    } else {
        SampleLine::NoMatch
    }
}

/// Read consecutive increment lines from `start` until one fails to match
fn collect_increments(lines: &[&str], start: usize) -> IncrementTable {
    let mut table = IncrementTable::new();
    let mut cursor = start;

    while let Some(increment) = lines.get(cursor).and_then(|line| parse_increment(line)) {
        table.push(increment);
        cursor += 1;
    }

    table
}

fn parse_increment(line: &str) -> Option<Increment> {
    let captures = INCREMENT_REGEX.captures(line.trim())?;
    Some(Increment {
        minutes: captures[1].parse().ok()?,
        counts: captures[2].parse().ok()?,
        increments: captures[3].parse().ok()?,
    })
}

/// One row per run with every scalar field; increment tables stay on the runs
pub fn logfile_frame(runs: &[LogfileRun]) -> Result<DataFrame> {
    let mut frame = df!(
        "logfileline" => runs.iter().map(|run| run.logfileline as u64).collect::<Vec<_>>(),
        "method" => runs.iter().map(|run| run.method.as_str()).collect::<Vec<_>>(),
        "bottle" => runs.iter().map(|run| run.bottle.as_str()).collect::<Vec<_>>(),
        "totalcounts" => runs.iter().map(|run| run.totalcounts).collect::<Vec<_>>(),
        "runtime" => runs.iter().map(|run| run.runtime as u64).collect::<Vec<_>>()
    )?;

    let dates: Vec<Option<NaiveDateTime>> = runs.iter().map(|run| Some(run.analysisdate)).collect();
    frame.with_column(datetime_series(ANALYSISDATE_COLUMN, &dates)?)?;

    Ok(frame)
}
