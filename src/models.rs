//! Core data structures for VINDTA logfile runs.
//!
//! A logfile run owns its increment table outright; nothing else holds a
//! reference into it.

use crate::constants::OTHER_SAMPLE_PREFIX;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One timed coulometer reading within a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Increment {
    pub minutes: f64,
    pub counts: f64,
    pub increments: f64,
}

impl Increment {
    /// Implicit first row of every increment table
    pub const ZERO: Increment = Increment {
        minutes: 0.0,
        counts: 0.0,
        increments: 0.0,
    };
}

/// Ordered coulometer readings of one run, always starting at (0, 0, 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementTable {
    rows: Vec<Increment>,
}

impl Default for IncrementTable {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementTable {
    /// Create a table holding only the seed row
    pub fn new() -> Self {
        Self {
            rows: vec![Increment::ZERO],
        }
    }

    pub fn push(&mut self, increment: Increment) {
        self.rows.push(increment);
    }

    pub fn rows(&self) -> &[Increment] {
        &self.rows
    }

    /// Number of rows, including the seed row
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Readings appended after the seed row
    pub fn recorded(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn last(&self) -> &Increment {
        self.rows.last().unwrap_or(&Increment::ZERO)
    }

    /// Mean of `increments` over rows with `minutes >= usefrom`, or `None`
    /// when no row qualifies
    pub fn blank(&self, usefrom: f64) -> Option<f64> {
        let (sum, n) = self
            .rows
            .iter()
            .filter(|row| row.minutes >= usefrom)
            .fold((0.0, 0usize), |(sum, n), row| (sum + row.increments, n + 1));

        (n > 0).then(|| sum / n as f64)
    }
}

/// What the line after a run start says about the sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleLine {
    /// `[bottle]\t<name>\t...`
    Bottle(String),
    /// `CRM\t<batch>\t...`
    Crm(String),
    /// The bare literal `other`
    Other,
    NoMatch,
}

impl SampleLine {
    /// Sample identifier for a run whose sample line sits at `line_index`.
    ///
    /// `None` for `NoMatch` or an empty captured name.
    pub fn into_bottle(self, line_index: usize) -> Option<String> {
        match self {
            SampleLine::Bottle(name) | SampleLine::Crm(name) if !name.is_empty() => Some(name),
            SampleLine::Other => Some(format!("{}{}", OTHER_SAMPLE_PREFIX, line_index)),
            _ => None,
        }
    }
}

/// One titration run detected in a VINDTA logfile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogfileRun {
    /// Zero-based index of the run start line
    pub logfileline: usize,
    pub method: String,
    pub analysisdate: NaiveDateTime,
    /// Sample identifier: bottle name, CRM batch or `other_<line>`
    pub bottle: String,
    pub table: IncrementTable,
    /// `increments` value of the last table row
    pub totalcounts: f64,
    /// Number of increment lines read from the logfile
    pub runtime: usize,
}

impl LogfileRun {
    pub fn new(
        logfileline: usize,
        method: String,
        analysisdate: NaiveDateTime,
        bottle: String,
        table: IncrementTable,
    ) -> Self {
        let totalcounts = table.last().increments;
        let runtime = table.recorded();
        Self {
            logfileline,
            method,
            analysisdate,
            bottle,
            table,
            totalcounts,
            runtime,
        }
    }
}
