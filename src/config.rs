//! Configuration for instrument file readers.
//!
//! Holds the handful of knobs that vary between laboratories: which
//! titration methods mark a run in the logfile, how the manifest spells a
//! missing value, and how long the LI-7000 preamble is.

use crate::constants::{
    DEFAULT_BLANK_USEFROM, DEFAULT_DBS_NULL_VALUE, DEFAULT_LI7000_SKIP_ROWS, DEFAULT_METHODS,
};
use crate::error::{KoolstofError, Result};
use serde::{Deserialize, Serialize};

/// Global configuration for reading VINDTA and LI-COR files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KoolstofConfig {
    /// Method names (without the `.mth` extension) that start a run
    pub methods: Vec<String>,

    /// Minutes into a run from which increments count towards the blank
    pub blank_usefrom: f64,

    /// Missing value marker in dbs files
    pub dbs_null_value: String,

    /// Preamble lines to skip above the LI-7000 header row
    pub li7000_skip_rows: usize,
}

impl Default for KoolstofConfig {
    fn default() -> Self {
        Self {
            methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
            blank_usefrom: DEFAULT_BLANK_USEFROM,
            dbs_null_value: DEFAULT_DBS_NULL_VALUE.to_string(),
            li7000_skip_rows: DEFAULT_LI7000_SKIP_ROWS,
        }
    }
}

impl KoolstofConfig {
    /// Replace the recognised method names
    pub fn with_methods<S: AsRef<str>>(mut self, methods: &[S]) -> Self {
        self.methods = methods.iter().map(|m| m.as_ref().to_string()).collect();
        self
    }

    /// Set the blank cutoff in minutes
    pub fn with_blank_usefrom(mut self, usefrom: f64) -> Self {
        self.blank_usefrom = usefrom;
        self
    }

    /// Set the dbs missing value marker
    pub fn with_dbs_null_value(mut self, marker: impl Into<String>) -> Self {
        self.dbs_null_value = marker.into();
        self
    }

    /// Set the number of LI-7000 preamble lines
    pub fn with_li7000_skip_rows(mut self, skip_rows: usize) -> Self {
        self.li7000_skip_rows = skip_rows;
        self
    }

    /// Reject settings the readers cannot work with
    pub fn validate(&self) -> Result<()> {
        self.validate_methods()?;

        if self.blank_usefrom.is_nan() || self.blank_usefrom <= 0.0 {
            return Err(KoolstofError::InvalidCutoff {
                usefrom: self.blank_usefrom,
            });
        }

        Ok(())
    }

    /// Check only the method list, for readers that need nothing else
    pub fn validate_methods(&self) -> Result<()> {
        if self.methods.is_empty() || self.methods.iter().any(|m| m.is_empty()) {
            return Err(KoolstofError::Configuration {
                message: "at least one non-empty method name is required".to_string(),
            });
        }
        Ok(())
    }
}
