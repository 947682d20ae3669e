//! Application constants for instrument file ingestion
//!
//! Column vocabularies, logfile layout offsets and default values shared by
//! the VINDTA and LI-COR readers.

// =============================================================================
// Shared column names
// =============================================================================

/// Sample identifier column in the dbs manifest
pub const BOTTLE_COLUMN: &str = "bottle";

/// Combined calendar timestamp derived from `date` and `time`
pub const ANALYSISDATE_COLUMN: &str = "analysisdate";

/// Numeric date, in days since 1970-01-01
pub const DATENUM_COLUMN: &str = "datenum";

/// Path the manifest was read from
pub const FILEPATH_COLUMN: &str = "filepath";

/// Raw date and time columns written by the instrument software
pub const DATE_COLUMN: &str = "date";
pub const TIME_COLUMN: &str = "time";

/// Added by the manifest/logfile matcher
pub const LOGFILE_ILOC_COLUMN: &str = "logfile_iloc";

/// Added by the blank extractor
pub const BLANK_COLUMN: &str = "blank_here";

/// LI-7000 calendar timestamp, after renaming from `Time`
pub const DATETIME_COLUMN: &str = "datetime";

/// Added by the LI-7000/dbs segmenter
pub const DBS_IX_COLUMN: &str = "dbs_ix";

// =============================================================================
// Column renaming
// =============================================================================

/// Vendor header -> column name for the Marianda dbs manifest
pub const DBS_COLUMN_MAP: &[(&str, &str)] = &[
    ("run type", "run_type"),
    ("i.s. temp.", "temperature_insitu"),
    ("sample mass", "mass_sample"),
    ("rep#", "rep"),
    ("CT", "dic"),
    ("factor CT", "dic_factor"),
    ("CV (µmol)", "cv_micromol"),
    ("CV (%)", "cv_percent"),
    ("last CRM CT", "lastcrm_dic_measured"),
    ("cert. CRM CT", "lastcrm_dic_certified"),
    ("CRM batch", "lastcrm_batch"),
    ("calc. mode", "mode_calculation"),
    ("integ. mode", "mode_integration"),
    ("Lat.", "latitude"),
    ("Long.", "longitude"),
    ("area#1", "area_1"),
    ("area#2", "area_2"),
    ("area#3", "area_3"),
    ("area#4", "area_4"),
];

/// Vendor header -> column name for LI-COR LI-7000 text files
pub const LI7000_COLUMN_MAP: &[(&str, &str)] = &[
    ("Time", "datetime"),
    ("CO2B um/m", "x_CO2"),
    ("H2OB mm/m", "x_H2O"),
    ("T C", "temperature"),
    ("P kPa", "pressure"),
    ("RH %", "humidity_relative"),
    ("Flow V", "flow_voltage"),
];

/// Header of the LI-7000 timestamp column before renaming
pub const LI7000_TIME_HEADER: &str = "Time";

// =============================================================================
// VINDTA logfile layout
// =============================================================================

/// Method names recognised in run start lines when none are configured
pub const DEFAULT_METHODS: &[&str] = &["3C standard"];

/// Suffix following the method name on a run start line
pub const RUN_START_SUFFIX: &str = r"\.mth run started ";

/// First increment line, counted from the run start line
pub const INCREMENT_OFFSET: usize = 4;

/// Literal sample line for runs of type "other"
pub const OTHER_SAMPLE_LINE: &str = "other";

/// Prefix of the synthetic identifier given to "other" runs
pub const OTHER_SAMPLE_PREFIX: &str = "other_";

/// Two-digit years in logfile and dbs dates are offset from this
pub const CENTURY: i32 = 2000;

// =============================================================================
// Defaults
// =============================================================================

/// Minutes into a run from which increments count towards the blank
pub const DEFAULT_BLANK_USEFROM: f64 = 6.0;

/// Missing value marker in dbs files
pub const DEFAULT_DBS_NULL_VALUE: &str = "none";

/// Preamble lines above the LI-7000 header row
pub const DEFAULT_LI7000_SKIP_ROWS: usize = 2;

// =============================================================================
// Time conversion
// =============================================================================

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const MICROSECONDS_PER_DAY: f64 = 86_400_000_000.0;
