//! Loading climatology tables from files.

use std::collections::BTreeMap;
use std::io::Write;

use climatology::{
    Climatology, ClimatologyConfig, ClimatologyDataset, ClimatologyError, Species,
};
use test_utils::{assert_approx_eq, fixtures::times};

const HNO3_TABLE: &str = r#"{
    "times": [1296000.0, 16934400.0],
    "lats": [-80.0, 0.0, 80.0],
    "p": [100.0, 10.0],
    "vmr": [
        [[2e-9, 1e-9, 2e-9], [8e-9, 6e-9, 8e-9]],
        [[3e-9, 1e-9, 3e-9], [9e-9, 6e-9, 9e-9]]
    ]
}"#;

const OH_TABLE: &str = r#"{
    "times": [0.0],
    "lats": [-90.0, 90.0],
    "p": [1000.0, 1.0],
    "vmr": [[[1e6, 1e6], [1e6, 1e6]]]
}"#;

fn write_table(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_configured_tables() {
    let file = write_table(HNO3_TABLE);
    let mut files = BTreeMap::new();
    files.insert(Species::Hno3, file.path().to_path_buf());

    let config = ClimatologyConfig {
        files,
        oh_chem_beta: 0.0,
    };
    let clim = ClimatologyDataset::load(&config).expect("load climatology");

    assert!(clim.has(Species::Hno3));
    assert!(!clim.has(Species::Oh));

    // On-node lookup: first slice, equator, 10 hPa
    assert_approx_eq!(clim.zonal_mean(Species::Hno3, 1296000.0, 0.0, 10.0), 6e-9, 1e-18);
    assert!(clim.zonal_mean(Species::Ho2, 0.0, 0.0, 10.0).is_nan());
}

#[test]
fn test_missing_file_is_read_error() {
    let mut files = BTreeMap::new();
    files.insert(Species::Oh, "/nonexistent/clim_oh.json".into());
    let config = ClimatologyConfig {
        files,
        oh_chem_beta: 0.0,
    };

    let err = ClimatologyDataset::load(&config).unwrap_err();
    assert!(matches!(err, ClimatologyError::Read { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_table("{ not json");
    let mut files = BTreeMap::new();
    files.insert(Species::Ho2, file.path().to_path_buf());
    let config = ClimatologyConfig {
        files,
        oh_chem_beta: 0.0,
    };

    let err = ClimatologyDataset::load(&config).unwrap_err();
    assert!(matches!(err, ClimatologyError::Parse { .. }));
}

#[test]
fn test_inconsistent_table_is_rejected() {
    let file = write_table(
        r#"{"times": [0.0], "lats": [0.0, 10.0], "p": [100.0], "vmr": [[[1.0]]]}"#,
    );
    let mut files = BTreeMap::new();
    files.insert(Species::O1d, file.path().to_path_buf());
    let config = ClimatologyConfig {
        files,
        oh_chem_beta: 0.0,
    };

    let err = ClimatologyDataset::load(&config).unwrap_err();
    assert!(matches!(err, ClimatologyError::InvalidTable(_)));
}

#[test]
fn test_configured_oh_scaling_follows_the_sun() {
    let file = write_table(OH_TABLE);
    let mut files = BTreeMap::new();
    files.insert(Species::Oh, file.path().to_path_buf());
    let config = ClimatologyConfig {
        files,
        oh_chem_beta: 0.5,
    };
    let clim = ClimatologyDataset::load(&config).unwrap();

    // Sun close to the zenith over (0, 0)
    let noon = clim.photochemical_oh(times::EQUINOX_NOON, 0.0, 0.0, 500.0);
    assert_approx_eq!(noon, 1e6 * (-0.5f64).exp(), 1e3);

    // Night side uses the capped zenith angle
    let night = clim.photochemical_oh(times::EQUINOX_NOON, 180.0, 0.0, 500.0);
    let capped = 1e6 * (-0.5 / 85f64.to_radians().cos()).exp();
    assert_approx_eq!(night, capped, 1e-6);
    assert!(night < noon);
}
