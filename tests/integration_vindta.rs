//! End-to-end tests for the VINDTA pipeline: dbs manifest and logfile in,
//! matched runs and per-sample blanks out.

use koolstof::constants::{BLANK_COLUMN, LOGFILE_ILOC_COLUMN};
use koolstof::frame::column_f64;
use koolstof::vindta::logfile_frame;
use koolstof::{
    KoolstofConfig, KoolstofError, get_blanks, match_dbs_to_logfile, read_dbs, read_logfile,
};
use std::io::Write;
use tempfile::NamedTempFile;

const DBS: &str = "\
run type\tbottle\tdate\ttime\tCT\tsample mass\t
sample\tSTD1\t05/14/19\t10:23\t2100.5\t100.2\t
CRM\tBATCH9\t05/14/19\t10:41\t2010.2\tnone\t
sample\tPLANNED\t05/15/19\t09:00\tnone\tnone\t
";

const LOGFILE: &str = "\
VINDTA 3C session opened 05/14/19  09:00
3C standard.mth run started 05/14/19  10:23
bottle\tSTD1\t1\t
sample mass\t100.2
pipette 1
2\t1800\t600\tA
4\t2100\t300\tA
6\t2300\t200\tA
8\t2400\t100\tA
end of titration
3C standard.mth run started 05/14/19  10:41
CRM\tBATCH9\t2\t
x
x
2\t1100\t50\tA
7\t1120\t20\tA
end of titration
3C standard.mth run started 05/14/19  11:02
other
x
x
session closed
";

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file
}

/// Manifest rows pick up their run index and blank; the planned row stays empty
#[test]
fn test_dbs_logfile_blanks() {
    let config = KoolstofConfig::default();
    let dbs_file = write_fixture(DBS);
    let logfile = write_fixture(LOGFILE);

    let mut dbs = read_dbs(dbs_file.path(), &config).unwrap();
    let runs = read_logfile(logfile.path(), &config).unwrap();

    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].bottle, "STD1");
    assert_eq!(runs[0].runtime, 4);
    assert_eq!(runs[0].totalcounts, 100.0);
    assert_eq!(runs[1].bottle, "BATCH9");
    assert_eq!(runs[2].bottle, "other_18");
    assert_eq!(runs[2].runtime, 0);

    let matches = match_dbs_to_logfile(&mut dbs, &runs).unwrap();
    assert_eq!(matches, vec![Some(0), Some(1), None]);
    assert_eq!(dbs.column(LOGFILE_ILOC_COLUMN).unwrap().null_count(), 1);

    let blanks = get_blanks(&mut dbs, &runs, config.blank_usefrom).unwrap();
    assert_eq!(blanks, vec![Some(150.0), Some(20.0), None]);
    assert_eq!(
        column_f64(&dbs, BLANK_COLUMN).unwrap(),
        vec![Some(150.0), Some(20.0), None]
    );

    let summary = logfile_frame(&runs).unwrap();
    assert_eq!(summary.height(), 3);
}

/// A later cutoff narrows the blank window
#[test]
fn test_custom_cutoff() {
    let config = KoolstofConfig::default().with_blank_usefrom(8.0);
    let mut dbs = read_dbs(write_fixture(DBS).path(), &config).unwrap();
    let runs = read_logfile(write_fixture(LOGFILE).path(), &config).unwrap();

    match_dbs_to_logfile(&mut dbs, &runs).unwrap();
    let blanks = get_blanks(&mut dbs, &runs, config.blank_usefrom).unwrap();
    assert_eq!(blanks, vec![Some(100.0), None, None]);
}

/// A manifest time that disagrees with the logfile for a known bottle is fatal
#[test]
fn test_time_mismatch_is_ambiguous() {
    let config = KoolstofConfig::default();
    let dbs_text = DBS.replace("10:41", "10:42");
    let mut dbs = read_dbs(write_fixture(&dbs_text).path(), &config).unwrap();
    let runs = read_logfile(write_fixture(LOGFILE).path(), &config).unwrap();

    assert!(matches!(
        match_dbs_to_logfile(&mut dbs, &runs),
        Err(KoolstofError::AmbiguousMatch { row: 1, matches: 0, .. })
    ));
}

/// Blanks cannot be computed before matching
#[test]
fn test_blanks_need_matches() {
    let config = KoolstofConfig::default();
    let mut dbs = read_dbs(write_fixture(DBS).path(), &config).unwrap();
    let runs = read_logfile(write_fixture(LOGFILE).path(), &config).unwrap();

    assert!(matches!(
        get_blanks(&mut dbs, &runs, config.blank_usefrom),
        Err(KoolstofError::MatchesMissing)
    ));
}

/// Zero-padded numeric bottle names still match their logfile run
#[test]
fn test_numeric_bottle_name_matches() {
    let config = KoolstofConfig::default();
    let dbs_file = write_fixture("bottle\tdate\ttime\t\n007\t05/14/19\t10:23\t\n");
    let logfile = write_fixture(
        "3C standard.mth run started 05/14/19  10:23\nbottle\t007\t1\t\nx\nx\n6\t900\t30\tA\n",
    );

    let mut dbs = read_dbs(dbs_file.path(), &config).unwrap();
    let runs = read_logfile(logfile.path(), &config).unwrap();

    assert_eq!(match_dbs_to_logfile(&mut dbs, &runs).unwrap(), vec![Some(0)]);
    assert_eq!(
        get_blanks(&mut dbs, &runs, config.blank_usefrom).unwrap(),
        vec![Some(30.0)]
    );
}
