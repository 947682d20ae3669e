//! Marianda VINDTA 3C titrator files.
//!
//! Parses the `logfile.bak` run log, matches its runs to rows of the dbs
//! manifest, and derives per-sample blank values from the matched runs'
//! coulometer increments.

pub mod blanks;
pub mod logfile;
pub mod matching;

pub use blanks::{blanks_from_matches, get_blanks};
pub use logfile::{LogfileParser, classify_sample_line, logfile_frame, read_logfile};
pub use matching::{ManifestKey, find_logfile_matches, manifest_keys, match_dbs_to_logfile};
