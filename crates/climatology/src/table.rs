//! Zonal-mean climatology tables.

use std::fs;
use std::path::Path;

use met_data::{lerp, Bracket};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClimatologyError, Result};

/// Length of the climatological year [s].
pub const YEAR_SECONDS: f64 = 365.25 * 86400.0;

/// A zonal-mean climatology of one species on a (time of year, pressure,
/// latitude) grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonalMeanTable {
    /// Seconds since the start of the year, ascending
    pub times: Vec<f64>,
    /// Latitudes [deg], monotonic
    pub lats: Vec<f64>,
    /// Pressures [hPa], monotonic
    #[serde(rename = "p")]
    pub pressures: Vec<f64>,
    /// Values indexed `[time][pressure][latitude]`
    pub vmr: Vec<Vec<Vec<f64>>>,
}

impl ZonalMeanTable {
    /// Load a table from a JSON document and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ClimatologyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table: Self = serde_json::from_str(&text).map_err(|source| ClimatologyError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        table.validate()?;

        info!(
            file = %path.display(),
            ntime = table.times.len(),
            nlat = table.lats.len(),
            np = table.pressures.len(),
            "Loaded zonal-mean climatology"
        );

        Ok(table)
    }

    /// Check axes and value shape.
    pub fn validate(&self) -> Result<()> {
        if self.times.is_empty() || self.lats.is_empty() || self.pressures.is_empty() {
            return Err(ClimatologyError::invalid_table("empty axis"));
        }
        if self.times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ClimatologyError::invalid_table("times must be strictly ascending"));
        }
        if self.times.iter().any(|&t| !(0.0..YEAR_SECONDS).contains(&t)) {
            return Err(ClimatologyError::invalid_table(
                "times must lie within one year",
            ));
        }
        if !is_monotonic(&self.lats) {
            return Err(ClimatologyError::invalid_table("latitudes must be monotonic"));
        }
        if !is_monotonic(&self.pressures) || self.pressures.iter().any(|&p| p <= 0.0) {
            return Err(ClimatologyError::invalid_table(
                "pressures must be positive and monotonic",
            ));
        }
        if self.vmr.len() != self.times.len() {
            return Err(ClimatologyError::invalid_table(format!(
                "{} time slices for {} times",
                self.vmr.len(),
                self.times.len()
            )));
        }
        for slice in &self.vmr {
            if slice.len() != self.pressures.len() {
                return Err(ClimatologyError::invalid_table("pressure dimension mismatch"));
            }
            for row in slice {
                if row.len() != self.lats.len() {
                    return Err(ClimatologyError::invalid_table("latitude dimension mismatch"));
                }
                if row.iter().any(|v| !v.is_finite()) {
                    return Err(ClimatologyError::invalid_table("non-finite value"));
                }
            }
        }
        Ok(())
    }

    /// Interpolate the climatology at a time [s since 2000-01-01], latitude
    /// [deg] and pressure [hPa].
    ///
    /// Latitude and pressure are clamped to the table range; time is taken
    /// modulo one year and interpolated periodically across the year boundary.
    /// The result is never negative.
    pub fn evaluate(&self, time: f64, lat: f64, p: f64) -> f64 {
        let ip = Bracket::locate(&self.pressures, p);
        let ilat = Bracket::locate(&self.lats, lat);

        let at = |it: usize| {
            let slice = &self.vmr[it];
            let lo = lerp(slice[ip.lo][ilat.lo], slice[ip.lo][ilat.hi], ilat.weight);
            let hi = lerp(slice[ip.hi][ilat.lo], slice[ip.hi][ilat.hi], ilat.weight);
            lerp(lo, hi, ip.weight)
        };

        let (lo, hi, weight) = self.time_bracket(time.rem_euclid(YEAR_SECONDS));
        lerp(at(lo), at(hi), weight).max(0.0)
    }

    fn time_bracket(&self, sec: f64) -> (usize, usize, f64) {
        let n = self.times.len();
        let first = self.times[0];
        let last = self.times[n - 1];

        if n == 1 {
            return (0, 0, 0.0);
        }

        // Wrap between the last slice of one year and the first of the next
        let (t_lo, t_hi) = if sec < first {
            (last - YEAR_SECONDS, first)
        } else if sec > last {
            (last, first + YEAR_SECONDS)
        } else {
            let b = Bracket::locate(&self.times, sec);
            return (b.lo, b.hi, b.weight);
        };

        let gap = t_hi - t_lo;
        let weight = if gap > 0.0 { (sec - t_lo) / gap } else { 0.0 };
        (n - 1, 0, weight)
    }
}

fn is_monotonic(axis: &[f64]) -> bool {
    axis.windows(2).all(|w| w[1] > w[0]) || axis.windows(2).all(|w| w[1] < w[0])
}
