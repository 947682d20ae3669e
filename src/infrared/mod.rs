//! LI-COR LI-7000 infrared gas analyser records.
//!
//! Reads the analyser's text export, recovers the sub-second timing the
//! instrument drops, and splits the continuous record into samples using
//! the dbs manifest timestamps.

pub mod li7000;
pub mod resolution;
pub mod samples;

pub use li7000::read_li7000;
pub use resolution::{Resolution, correct_resolution, second_fractions};
pub use samples::{get_licor_samples, sample_indices};
