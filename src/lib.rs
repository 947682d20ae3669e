//! Koolstof
//!
//! Readers and processing steps for marine carbonate chemistry instrument
//! output:
//! - the dbs run manifest of the Marianda VINDTA 3C titrator
//! - the titrator's `logfile.bak`, matched back to manifest rows to derive
//!   coulometer blanks
//! - LI-COR LI-7000 infrared analyser records, with sub-second timestamps
//!   recovered and the continuous record split into manifest samples
//!
//! Tables are polars `DataFrame`s. Timestamps are kept both as calendar
//! datetimes and as `datenum`, fractional days since 1970-01-01.

pub mod config;
pub mod constants;
pub mod dbs;
pub mod error;
pub mod frame;
pub mod infrared;
pub mod models;
pub mod numeric;
pub mod timestamps;
pub mod vindta;

pub use config::KoolstofConfig;
pub use dbs::read_dbs;
pub use error::{KoolstofError, Result};
pub use infrared::{correct_resolution, get_licor_samples, read_li7000};
pub use models::{Increment, IncrementTable, LogfileRun, SampleLine};
pub use numeric::sigfig;
pub use timestamps::{datenum, from_datenum};
pub use vindta::{LogfileParser, get_blanks, match_dbs_to_logfile, read_logfile};
