//! Configuration for the zonal-mean engine.

use std::path::PathBuf;

use climatology::{ClimatologyConfig, Species};
use serde::{Deserialize, Serialize};

use crate::accumulator::ConvectiveGate;
use crate::control::{ControlFile, NO_FILE};
use crate::error::{Result, ZonalMeanError};

/// Default level capacity of the output grid.
pub const DEFAULT_MAX_LEVELS: usize = 1000;

/// Default latitude capacity of the output grid.
pub const DEFAULT_MAX_LATS: usize = 721;

/// Immutable engine configuration.
///
/// Optional bounds and steps are derived from the first usable snapshot when
/// unset. Control files express "unset" with negative values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonalMeanConfig {
    /// Lower altitude bound [km].
    pub z0: Option<f64>,

    /// Upper altitude bound [km].
    pub z1: Option<f64>,

    /// Altitude step [km]; native levels are used when unset.
    pub dz: Option<f64>,

    /// Longitude band [deg] of the native columns that contribute.
    pub lon0: f64,
    pub lon1: f64,

    /// Latitude range [deg] of the bins.
    pub lat0: f64,
    pub lat1: f64,

    /// Latitude step [deg]; inferred from the snapshot when unset.
    pub dlat: Option<f64>,

    /// Minimum CAPE [J/kg] for a convective sample.
    pub conv_cape: f64,

    /// CIN limit [J/kg]; no limit when unset.
    pub conv_cin: Option<f64>,

    /// Maximum number of output levels.
    pub max_levels: usize,

    /// Maximum number of latitude bins.
    pub max_lats: usize,

    /// Climatology tables and OH scaling.
    pub climatology: ClimatologyConfig,
}

impl Default for ZonalMeanConfig {
    fn default() -> Self {
        Self {
            z0: None,
            z1: None,
            dz: None,
            lon0: -360.0,
            lon1: 360.0,
            lat0: -90.0,
            lat1: 90.0,
            dlat: None,
            conv_cape: -999.0,
            conv_cin: None,
            max_levels: DEFAULT_MAX_LEVELS,
            max_lats: DEFAULT_MAX_LATS,
            climatology: ClimatologyConfig::default(),
        }
    }
}

impl ZonalMeanConfig {
    /// Build the configuration from control parameters.
    pub fn from_control(control: &ControlFile) -> Result<Self> {
        let mut files = std::collections::BTreeMap::new();
        for species in Species::ALL {
            let file = control.get_str(&species.filename_key(), NO_FILE);
            if file != NO_FILE {
                files.insert(species, PathBuf::from(file));
            }
        }

        let config = Self {
            z0: non_negative(control.get_f64("ZM_Z0", -1.0)?),
            z1: non_negative(control.get_f64("ZM_Z1", -1.0)?),
            dz: non_negative(control.get_f64("ZM_DZ", -1.0)?),
            lon0: control.get_f64("ZM_LON0", -360.0)?,
            lon1: control.get_f64("ZM_LON1", 360.0)?,
            lat0: control.get_f64("ZM_LAT0", -90.0)?,
            lat1: control.get_f64("ZM_LAT1", 90.0)?,
            dlat: positive(control.get_f64("ZM_DLAT", -1.0)?),
            conv_cape: control.get_f64("CONV_CAPE", -999.0)?,
            conv_cin: positive(control.get_f64("CONV_CIN", -999.0)?),
            max_levels: control.get_usize("ZM_MAX_LEVELS", DEFAULT_MAX_LEVELS)?,
            max_lats: control.get_usize("ZM_MAX_LATS", DEFAULT_MAX_LATS)?,
            climatology: ClimatologyConfig {
                files,
                oh_chem_beta: control.get_f64("OH_CHEM_BETA", 0.0)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("ZM_Z0", self.z0),
            ("ZM_Z1", self.z1),
            ("ZM_DZ", self.dz),
            ("ZM_LON0", Some(self.lon0)),
            ("ZM_LON1", Some(self.lon1)),
            ("ZM_LAT0", Some(self.lat0)),
            ("ZM_LAT1", Some(self.lat1)),
            ("ZM_DLAT", self.dlat),
            ("CONV_CAPE", Some(self.conv_cape)),
            ("CONV_CIN", self.conv_cin),
            ("OH_CHEM_BETA", Some(self.climatology.oh_chem_beta)),
        ];
        for (name, value) in values {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(ZonalMeanError::config(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if let Some(dz) = self.dz {
            if dz <= 0.0 {
                return Err(ZonalMeanError::config("ZM_DZ must be > 0"));
            }
        }

        if let (Some(z0), Some(z1)) = (self.z0, self.z1) {
            if z0 > z1 {
                return Err(ZonalMeanError::config(format!(
                    "ZM_Z0 ({}) must not exceed ZM_Z1 ({})",
                    z0, z1
                )));
            }
        }

        if self.lon0 > self.lon1 {
            return Err(ZonalMeanError::config(format!(
                "ZM_LON0 ({}) must not exceed ZM_LON1 ({})",
                self.lon0, self.lon1
            )));
        }

        if self.lat0 > self.lat1 {
            return Err(ZonalMeanError::config(format!(
                "ZM_LAT0 ({}) must not exceed ZM_LAT1 ({})",
                self.lat0, self.lat1
            )));
        }

        if self.max_levels == 0 || self.max_lats == 0 {
            return Err(ZonalMeanError::config("grid capacities must be > 0"));
        }

        Ok(())
    }

    /// Validity gate of the convective group.
    pub fn convective_gate(&self) -> ConvectiveGate {
        ConvectiveGate {
            cape_min: self.conv_cape,
            cin_max: self.conv_cin,
        }
    }
}

fn non_negative(value: f64) -> Option<f64> {
    (value >= 0.0).then_some(value)
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_control() {
        let config = ZonalMeanConfig::from_control(&ControlFile::default()).unwrap();
        assert_eq!(config.z0, None);
        assert_eq!(config.dz, None);
        assert_eq!(config.lon0, -360.0);
        assert_eq!(config.lat1, 90.0);
        assert_eq!(config.conv_cape, -999.0);
        assert_eq!(config.conv_cin, None);
        assert_eq!(config.max_levels, 1000);
        assert_eq!(config.max_lats, 721);
        assert!(config.climatology.files.is_empty());
    }

    #[test]
    fn test_from_control() {
        let control = ControlFile::parse(
            "ZM_Z0 = 0\nZM_Z1 = 30\nZM_DZ = 1\nZM_DLAT = 5\nCONV_CAPE = 100\nCONV_CIN = 50\n\
             CLIM_HNO3_FILENAME = hno3.json\nCLIM_OH_FILENAME = -\nOH_CHEM_BETA = 0.3\n",
        );
        let config = ZonalMeanConfig::from_control(&control).unwrap();
        assert_eq!(config.z0, Some(0.0));
        assert_eq!(config.z1, Some(30.0));
        assert_eq!(config.dz, Some(1.0));
        assert_eq!(config.dlat, Some(5.0));
        assert_eq!(config.conv_cin, Some(50.0));
        assert_eq!(config.climatology.oh_chem_beta, 0.3);
        assert_eq!(
            config.climatology.files.get(&Species::Hno3),
            Some(&PathBuf::from("hno3.json"))
        );
        assert!(!config.climatology.files.contains_key(&Species::Oh));

        let gate = config.convective_gate();
        assert_eq!(gate.cape_min, 100.0);
        assert_eq!(gate.cin_max, Some(50.0));
    }

    #[test]
    fn test_non_positive_cin_means_no_limit() {
        let control = ControlFile::parse("CONV_CIN = 0\nZM_DLAT = 0\n");
        let config = ZonalMeanConfig::from_control(&control).unwrap();
        assert_eq!(config.conv_cin, None);
        assert_eq!(config.dlat, None);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let control = ControlFile::parse("ZM_LAT0 = 10\nZM_LAT1 = -10\n");
        assert!(ZonalMeanConfig::from_control(&control).is_err());

        let control = ControlFile::parse("ZM_Z0 = 20\nZM_Z1 = 10\n");
        assert!(ZonalMeanConfig::from_control(&control).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let control = ControlFile::parse("ZM_DZ = 0\n");
        assert!(ZonalMeanConfig::from_control(&control).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        for text in ["ZM_LAT0 = nan\n", "ZM_LAT1 = inf\n", "ZM_DZ = nan\n", "CONV_CIN = inf\n"] {
            let err = ZonalMeanConfig::from_control(&ControlFile::parse(text)).unwrap_err();
            assert!(matches!(err, ZonalMeanError::ConfigError(_)), "{}", text);
        }

        let config = ZonalMeanConfig {
            lat0: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ZonalMeanConfig {
            dlat: Some(f64::INFINITY),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ZonalMeanConfig {
            conv_cape: f64::NEG_INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = ZonalMeanConfig {
            max_lats: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
