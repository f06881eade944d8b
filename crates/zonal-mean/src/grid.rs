//! Output grid geometry.
//!
//! The grid is fixed once per run from the configuration and the first
//! usable snapshot.

use met_data::Snapshot;
use serde::Serialize;
use tracing::info;

use crate::config::ZonalMeanConfig;
use crate::error::{Result, ZonalMeanError};
use crate::thermo::{p_from_z, z_from_p};

/// Relative end tolerance of stepped sequences.
const STEP_TOLERANCE: f64 = 1e-9;

/// Pressure levels and latitude bins of the output cross-section, plus the
/// longitude band of the contributing columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonalGrid {
    /// Output pressure levels [hPa].
    pub pressures: Vec<f64>,
    /// Latitude bins [deg].
    pub lats: Vec<f64>,
    /// Longitude band [deg].
    pub lon0: f64,
    pub lon1: f64,
}

impl ZonalGrid {
    /// Number of levels.
    pub fn nz(&self) -> usize {
        self.pressures.len()
    }

    /// Number of latitude bins.
    pub fn ny(&self) -> usize {
        self.lats.len()
    }

    /// Log-pressure altitude [km] of level `iz`.
    pub fn altitude(&self, iz: usize) -> f64 {
        z_from_p(self.pressures[iz])
    }

    /// Whether a native column at `lon` lies inside the longitude band.
    pub fn contains_lon(&self, lon: f64) -> bool {
        lon >= self.lon0 && lon <= self.lon1
    }
}

/// Derives a [`ZonalGrid`] from the configuration and a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder<'a> {
    config: &'a ZonalMeanConfig,
}

impl<'a> GridBuilder<'a> {
    pub fn new(config: &'a ZonalMeanConfig) -> Self {
        Self { config }
    }

    /// Build the grid.
    pub fn build(&self, snapshot: &Snapshot) -> Result<ZonalGrid> {
        let pressures = self.levels(snapshot)?;
        let lats = self.latitudes(snapshot)?;

        info!(
            levels = pressures.len(),
            lats = lats.len(),
            lon0 = self.config.lon0,
            lon1 = self.config.lon1,
            "Built zonal-mean grid"
        );

        Ok(ZonalGrid {
            pressures,
            lats,
            lon0: self.config.lon0,
            lon1: self.config.lon1,
        })
    }

    fn levels(&self, snapshot: &Snapshot) -> Result<Vec<f64>> {
        let (p_min, p_max) = snapshot.pressure_range();
        let z0 = self.config.z0.unwrap_or_else(|| z_from_p(p_max));
        let z1 = self.config.z1.unwrap_or_else(|| z_from_p(p_min));

        let pressures: Vec<f64> = match self.config.dz {
            None => snapshot
                .p
                .iter()
                .copied()
                .filter(|&p| {
                    let z = z_from_p(p);
                    z >= z0 && z <= z1
                })
                .collect(),
            Some(dz) => {
                let n = step_count("pressure levels", z0, z1, dz, self.config.max_levels)?;
                (0..n).map(|i| p_from_z(z0 + i as f64 * dz)).collect()
            }
        };

        check_capacity("pressure levels", pressures.len(), self.config.max_levels)?;
        if pressures.is_empty() {
            return Err(ZonalMeanError::invalid_grid(format!(
                "no pressure levels between {} km and {} km",
                z0, z1
            )));
        }
        Ok(pressures)
    }

    fn latitudes(&self, snapshot: &Snapshot) -> Result<Vec<f64>> {
        let dlat = match self.config.dlat {
            Some(dlat) => dlat,
            None => {
                if snapshot.ny() < 2 {
                    return Err(ZonalMeanError::invalid_grid(
                        "cannot infer latitude step from a single latitude",
                    ));
                }
                (snapshot.lat[1] - snapshot.lat[0]).abs()
            }
        };

        let (lat0, lat1) = if self.config.lat0 < -90.0 && self.config.lat1 > 90.0 {
            snapshot.lat_range()
        } else {
            (self.config.lat0, self.config.lat1)
        };

        let n = step_count("latitudes", lat0, lat1, dlat, self.config.max_lats)?;
        if n == 0 {
            return Err(ZonalMeanError::invalid_grid(format!(
                "no latitudes between {} and {}",
                lat0, lat1
            )));
        }
        Ok((0..n).map(|i| lat0 + i as f64 * dlat).collect())
    }
}

/// Number of values `x0 + i*dx` not exceeding `x1` (with tolerance).
///
/// The count is bounded by `capacity` before it is converted to an index.
fn step_count(what: &'static str, x0: f64, x1: f64, dx: f64, capacity: usize) -> Result<usize> {
    if x1 < x0 {
        return Ok(0);
    }
    let n = ((x1 - x0) / dx + STEP_TOLERANCE).floor() + 1.0;
    if n.is_nan() {
        return Err(ZonalMeanError::invalid_grid(format!(
            "cannot step {} from {} to {} by {}",
            what, x0, x1, dx
        )));
    }
    if n > capacity as f64 {
        // Saturates for infinite counts
        return Err(ZonalMeanError::capacity_exceeded(what, n as usize, capacity));
    }
    Ok(n as usize)
}

fn check_capacity(what: &'static str, requested: usize, capacity: usize) -> Result<()> {
    if requested > capacity {
        return Err(ZonalMeanError::capacity_exceeded(what, requested, capacity));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAX_LATS, DEFAULT_MAX_LEVELS};
    use crate::control::ControlFile;
    use test_utils::{assert_approx_eq, create_test_snapshot, fixtures::axes};

    fn snapshot() -> Snapshot {
        create_test_snapshot(&axes::LON_GLOBAL, &axes::LAT_COARSE, &axes::P_LEVELS, 0.0)
    }

    fn count(x0: f64, x1: f64, dx: f64) -> usize {
        step_count("steps", x0, x1, dx, 100).unwrap()
    }

    #[test]
    fn test_step_count() {
        assert_eq!(count(0.0, 10.0, 5.0), 3);
        assert_eq!(count(0.0, 9.9, 5.0), 2);
        assert_eq!(count(0.0, 0.0, 1.0), 1);
        assert_eq!(count(1.0, 0.0, 1.0), 0);
        // 0.1 steps accumulate error without the tolerance
        assert_eq!(count(0.0, 0.3, 0.1), 4);
        assert_eq!(count(0.0, 99.0, 1.0), 100);
    }

    #[test]
    fn test_step_count_is_bounded_by_capacity() {
        let err = step_count("steps", 0.0, 100.0, 1.0, 100).unwrap_err();
        assert!(matches!(
            err,
            ZonalMeanError::CapacityExceeded {
                requested: 101,
                capacity: 100,
                ..
            }
        ));

        for (x1, dx) in [(90.0, 1e-300), (f64::INFINITY, 1.0), (1.0, 0.0)] {
            let err = step_count("steps", 0.0, x1, dx, 100).unwrap_err();
            assert!(
                matches!(
                    err,
                    ZonalMeanError::CapacityExceeded {
                        requested: usize::MAX,
                        capacity: 100,
                        ..
                    }
                ),
                "x1 = {}, dx = {}",
                x1,
                dx
            );
        }

        let err = step_count("steps", 0.0, 1.0, f64::NAN, 100).unwrap_err();
        assert!(matches!(err, ZonalMeanError::InvalidGrid(_)));
    }

    #[test]
    fn test_tiny_latitude_step_exceeds_capacity() {
        let control = ControlFile::parse("ZM_DLAT = 1e-300\n");
        let config = ZonalMeanConfig::from_control(&control).unwrap();
        let err = GridBuilder::new(&config).build(&snapshot()).unwrap_err();
        assert!(matches!(
            err,
            ZonalMeanError::CapacityExceeded {
                what: "latitudes",
                capacity: DEFAULT_MAX_LATS,
                ..
            }
        ));
    }

    #[test]
    fn test_tiny_level_step_exceeds_capacity() {
        let control = ControlFile::parse("ZM_Z0 = 0\nZM_Z1 = 10\nZM_DZ = 1e-300\n");
        let config = ZonalMeanConfig::from_control(&control).unwrap();
        let err = GridBuilder::new(&config).build(&snapshot()).unwrap_err();
        assert!(matches!(
            err,
            ZonalMeanError::CapacityExceeded {
                what: "pressure levels",
                capacity: DEFAULT_MAX_LEVELS,
                ..
            }
        ));
    }

    #[test]
    fn test_native_levels_by_default() {
        let config = ZonalMeanConfig::default();
        let grid = GridBuilder::new(&config).build(&snapshot()).unwrap();
        assert_eq!(grid.pressures, axes::P_LEVELS.to_vec());
    }

    #[test]
    fn test_native_levels_within_bounds() {
        let config = ZonalMeanConfig {
            z0: Some(1.0),
            z1: Some(12.0),
            ..Default::default()
        };
        let grid = GridBuilder::new(&config).build(&snapshot()).unwrap();
        // 1000 hPa is below 1 km, 100 hPa above 12 km
        assert_eq!(grid.pressures, vec![850.0, 500.0, 250.0]);
    }

    #[test]
    fn test_stepped_levels() {
        let config = ZonalMeanConfig {
            z0: Some(0.0),
            z1: Some(10.0),
            dz: Some(5.0),
            ..Default::default()
        };
        let grid = GridBuilder::new(&config).build(&snapshot()).unwrap();
        assert_eq!(grid.nz(), 3);
        assert_approx_eq!(grid.pressures[0], 1013.25, 1e-9);
        assert_approx_eq!(grid.altitude(1), 5.0, 1e-9);
        assert_approx_eq!(grid.altitude(2), 10.0, 1e-9);
    }

    #[test]
    fn test_latitudes_inferred() {
        let config = ZonalMeanConfig::default();
        let grid = GridBuilder::new(&config).build(&snapshot()).unwrap();
        assert_eq!(grid.lats, axes::LAT_COARSE.to_vec());
    }

    #[test]
    fn test_latitudes_from_snapshot_extent() {
        let config = ZonalMeanConfig {
            lat0: -100.0,
            lat1: 100.0,
            dlat: Some(20.0),
            ..Default::default()
        };
        let snap = create_test_snapshot(&[0.0], &axes::LAT_TROPICS, &axes::P_SINGLE, 0.0);
        let grid = GridBuilder::new(&config).build(&snap).unwrap();
        assert_eq!(grid.lats, vec![-20.0, 0.0, 20.0]);
    }

    #[test]
    fn test_level_capacity_exceeded() {
        let config = ZonalMeanConfig {
            z0: Some(0.0),
            z1: Some(10.0),
            dz: Some(1.0),
            max_levels: 5,
            ..Default::default()
        };
        let err = GridBuilder::new(&config).build(&snapshot()).unwrap_err();
        assert!(matches!(
            err,
            ZonalMeanError::CapacityExceeded {
                requested: 11,
                capacity: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_latitude_capacity_exceeded() {
        let config = ZonalMeanConfig {
            dlat: Some(0.1),
            ..Default::default()
        };
        let err = GridBuilder::new(&config).build(&snapshot()).unwrap_err();
        assert!(matches!(err, ZonalMeanError::CapacityExceeded { what: "latitudes", .. }));
    }

    #[test]
    fn test_single_latitude_needs_step() {
        let config = ZonalMeanConfig::default();
        let snap = create_test_snapshot(&[0.0], &[0.0], &axes::P_SINGLE, 0.0);
        let err = GridBuilder::new(&config).build(&snap).unwrap_err();
        assert!(matches!(err, ZonalMeanError::InvalidGrid(_)));
    }

    #[test]
    fn test_empty_level_set() {
        let config = ZonalMeanConfig {
            z0: Some(40.0),
            z1: Some(50.0),
            ..Default::default()
        };
        let err = GridBuilder::new(&config).build(&snapshot()).unwrap_err();
        assert!(matches!(err, ZonalMeanError::InvalidGrid(_)));
    }

    #[test]
    fn test_contains_lon() {
        let config = ZonalMeanConfig {
            lon0: 0.0,
            lon1: 90.0,
            ..Default::default()
        };
        let grid = GridBuilder::new(&config).build(&snapshot()).unwrap();
        assert!(grid.contains_lon(0.0));
        assert!(grid.contains_lon(90.0));
        assert!(!grid.contains_lon(-90.0));
    }
}
