//! End-to-end runs from control and snapshot files to the output table.

use std::io::Write;
use std::path::Path;

use climatology::{Climatology, ClimatologyDataset, Species};
use met_data::AutoReader;
use test_utils::{
    create_test_snapshot, fixtures::axes, fixtures::control, fixtures::times, write_control,
    write_snapshot,
};
use zonal_mean::{ControlFile, ZonalMeanConfig, ZonalMeanEngine, ZonalMeanError};

const HNO3_TABLE: &str = r#"{
    "times": [0.0],
    "lats": [-90.0, 90.0],
    "p": [1000.0, 1.0],
    "vmr": [[[5e-9, 5e-9], [5e-9, 5e-9]]]
}"#;

fn data_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.split(' ').map(str::to_string).collect())
        .collect()
}

#[test]
fn test_run_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write_snapshot(
            dir.path(),
            "met_00.json",
            &create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, 0.0),
        ),
        dir.path().join("missing.json"),
        write_snapshot(
            dir.path(),
            "met_06.json",
            &create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, times::PLUS_6H),
        ),
    ];

    let ctl = write_control(control::REGULAR);
    let control = ControlFile::load(ctl.path()).unwrap();
    let config = ZonalMeanConfig::from_control(&control).unwrap();
    let clim = ClimatologyDataset::load(&config.climatology).unwrap();

    let mut engine = ZonalMeanEngine::new(&config, &clim);
    let processed = engine.process_files(&AutoReader, &files).unwrap();
    assert_eq!(processed, 2);

    let out = dir.path().join("zm.tab");
    engine.finish().unwrap().write(&out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let rows = data_rows(&text);
    // Levels at 0, 5 and 10 km, bins every 45 degrees
    assert_eq!(rows.len(), 3 * 5);
    assert_eq!(rows[0][0], "10800.00");
    assert_eq!(rows[0][1], "0");
    assert_eq!(rows[0][3], "-90");
    assert_eq!(rows[5][1], "5");
    assert_eq!(rows[14][3], "90");
    for row in &rows {
        assert_eq!(row.len(), 50);
        assert_eq!(row[47], "8");
        assert_eq!(row[48], "8");
        assert_eq!(row[49], "8");
    }
}

#[test]
fn test_climatology_columns() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("clim_hno3.json");
    std::fs::File::create(&table)
        .unwrap()
        .write_all(HNO3_TABLE.as_bytes())
        .unwrap();

    let mut control = ControlFile::default();
    control.set("CLIM_HNO3_FILENAME", table.to_str().unwrap());
    let config = ZonalMeanConfig::from_control(&control).unwrap();
    let clim = ClimatologyDataset::load(&config.climatology).unwrap();
    assert_eq!(clim.zonal_mean(Species::Hno3, 0.0, 0.0, 500.0), 5e-9);

    let snap = create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, 0.0);
    let mut engine = ZonalMeanEngine::new(&config, &clim);
    engine.process_snapshot(&snap).unwrap();
    let result = engine.finish().unwrap();

    let mean = result.accumulators.cell(2, 2).primary.mean().unwrap();
    assert_eq!(mean.hno3, 5e-9);
    assert!(mean.tnat.is_finite());
    assert!(mean.oh.is_nan());
}

#[test]
fn test_no_readable_snapshot() {
    let config = ZonalMeanConfig::default();
    let clim = ClimatologyDataset::default();
    let mut engine = ZonalMeanEngine::new(&config, &clim);

    let processed = engine
        .process_files(&AutoReader, &[Path::new("/nonexistent/met.json")])
        .unwrap();
    assert_eq!(processed, 0);
    assert!(matches!(engine.finish(), Err(ZonalMeanError::NoSnapshot)));
}

#[test]
fn test_capacity_exceeded_is_reported() {
    let mut control = ControlFile::default();
    control.apply_override("ZM_MAX_LATS=3").unwrap();
    let config = ZonalMeanConfig::from_control(&control).unwrap();
    let clim = ClimatologyDataset::default();

    let snap = create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, 0.0);
    let mut engine = ZonalMeanEngine::new(&config, &clim);
    let err = engine.process_snapshot(&snap).unwrap_err();
    assert!(matches!(
        err,
        ZonalMeanError::CapacityExceeded {
            requested: 5,
            capacity: 3,
            ..
        }
    ));
}
