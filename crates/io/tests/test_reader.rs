//! Integration test: reading event and soil files from disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use creek_io::{IoError, ReaderConfig, read_event, read_soil, seeds_for_event};

fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).expect("create file");
    f.write_all(body.as_bytes()).expect("write file");
    path
}

#[test]
fn reads_event_with_levels() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        dir.path(),
        "event.csv",
        "timestamp,precipitation,level\n\
         2023-05-16 00:00:00,0.0,0.10\n\
         2023-05-16 00:15:00,2.4,-9999\n\
         2023-05-16 00:30:00,5.1,\n\
         2023-05-16 00:45:00,1.0,0.35\n",
    );

    let event = read_event(&path, &ReaderConfig::default()).expect("read succeeds");
    assert_eq!(event.len(), 4);
    assert_eq!(event.first_day(), NaiveDate::from_ymd_opt(2023, 5, 16));
    assert_eq!(event.precipitation(), &[0.0, 2.4, 5.1, 1.0]);

    let level = event.level().expect("level column present");
    assert_eq!(level[0], 0.10);
    assert!(level[1].is_nan());
    assert!(level[2].is_nan());

    let samples = event.samples();
    assert_eq!(samples[1].precipitation, 2.4);
    assert_eq!(samples[1].timestamp, event.timestamps()[1]);

    let observed = event.observed_levels().unwrap().unwrap();
    assert_eq!(observed.len(), 4);
}

#[test]
fn reads_event_with_custom_columns_and_no_level() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        dir.path(),
        "quaderna.csv",
        "Dataf,P30\n2023-05-01 00:00,0.2\n2023-05-01 00:30,0.0\n",
    );
    let config = ReaderConfig::default()
        .with_timestamp_column("Dataf")
        .with_precipitation_column("P30");

    let event = read_event(&path, &config).expect("read succeeds");
    assert_eq!(event.len(), 2);
    assert!(event.level().is_none());
    assert!(event.observed_levels().unwrap().is_none());
}

#[test]
fn missing_file_is_reported() {
    let err = read_event(Path::new("/nonexistent/event.csv"), &ReaderConfig::default())
        .unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn missing_precipitation_column_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(dir.path(), "bad.csv", "timestamp,rain\n2023-05-16 00:00,1\n");
    let err = read_event(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::MissingColumn { ref name, .. } if name == "precipitation"));
}

#[test]
fn unordered_timestamps_are_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        dir.path(),
        "unordered.csv",
        "timestamp,precipitation\n2023-05-16 01:00,1\n2023-05-16 00:00,1\n",
    );
    let err = read_event(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
}

#[test]
fn bad_precipitation_value_names_its_row() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        dir.path(),
        "bad_value.csv",
        "timestamp,precipitation\n2023-05-16 00:00,1\n2023-05-16 01:00,abc\n",
    );
    let err = read_event(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::InvalidValue { row: 2, .. }));
}

#[test]
fn header_only_file_is_empty() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(dir.path(), "empty.csv", "timestamp,precipitation\n");
    assert!(matches!(
        read_event(&path, &ReaderConfig::default()),
        Err(IoError::Empty { .. })
    ));
}

#[test]
fn soil_file_feeds_event_seeds() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(
        dir.path(),
        "soil.csv",
        "DATE,DEFICIT_35,DEFICIT_90\n\
         2023-05-16,4.0,20.0\n\
         2023-05-14,18.5,55.0\n\
         2023-05-15,11.0,42.0\n",
    );

    let records = read_soil(&path).expect("read succeeds");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2023, 5, 14).unwrap());

    let first_day = NaiveDate::from_ymd_opt(2023, 5, 16).unwrap();
    let seeds = seeds_for_event(&records, first_day).unwrap();
    assert_eq!(seeds.len(), 2);
    assert_eq!(seeds[0].swc35, -11.0);
    assert_eq!(seeds[0].deficit90, 42.0);
    assert_eq!(seeds[1].deficit90, 20.0);
}
