//! Native NetCDF snapshot reading using the netcdf library.
//!
//! Expects CF-style files with `lon`, `lat` and `plev` coordinate variables,
//! a `time` coordinate with a `<unit> since <date>` units attribute, and data
//! variables named after the short field names (`t`, `u`, `ps`, ...; an
//! upper-case spelling is accepted too). Pressure-level variables are laid out
//! `[time,] plev, lat, lon`; surface variables `[time,] lat, lon`. Only the
//! first time step is read.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use crate::error::{MetDataError, MetDataResult};
use crate::fields::{Field2d, Field3d};
use crate::reader::SnapshotReader;
use crate::snapshot::Snapshot;
use crate::time::{datetime_to_seconds, parse_time};

/// Reader for NetCDF snapshot files.
#[derive(Debug, Clone)]
pub struct NetCdfSnapshotReader {
    /// Candidate names of the pressure coordinate
    pub level_names: Vec<String>,
}

impl Default for NetCdfSnapshotReader {
    fn default() -> Self {
        Self {
            level_names: vec!["plev".to_string(), "lev".to_string(), "level".to_string()],
        }
    }
}

impl SnapshotReader for NetCdfSnapshotReader {
    fn read(&self, path: &Path) -> MetDataResult<Snapshot> {
        let nc_file = netcdf::open(path)
            .map_err(|e| MetDataError::invalid(format!("Failed to open NetCDF: {}", e)))?;

        let lon = read_axis(&nc_file, "lon")?;
        let lat = read_axis(&nc_file, "lat")?;

        let level_var = self
            .level_names
            .iter()
            .find_map(|name| nc_file.variable(name))
            .ok_or_else(|| MetDataError::missing("pressure coordinate variable"))?;
        let mut p: Vec<f64> = level_var
            .get_values(..)
            .map_err(|e| MetDataError::invalid(format!("Failed to read pressure axis: {}", e)))?;
        if get_str_attr(&level_var, "units").as_deref() == Some("Pa") {
            p.iter_mut().for_each(|v| *v /= 100.0);
        }

        let time = read_time(&nc_file)?;

        let mut snapshot = Snapshot::new(time, lon, lat, p)?;
        let (nx, ny, np) = (snapshot.nx(), snapshot.ny(), snapshot.np());

        for field in Field3d::ALL {
            let Some(var) = find_variable(&nc_file, field.name()) else {
                continue;
            };
            let raw = read_scaled(&var, np * ny * nx)?;
            // File order is (plev, lat, lon); snapshot order is (lon, lat, plev)
            let mut data = vec![f32::NAN; raw.len()];
            for ip in 0..np {
                for iy in 0..ny {
                    for ix in 0..nx {
                        data[(ix * ny + iy) * np + ip] = raw[(ip * ny + iy) * nx + ix];
                    }
                }
            }
            snapshot.set3d(field, data)?;
        }

        for field in Field2d::ALL {
            let Some(var) = find_variable(&nc_file, field.name()) else {
                continue;
            };
            let raw = read_scaled(&var, ny * nx)?;
            let mut data = vec![f32::NAN; raw.len()];
            for iy in 0..ny {
                for ix in 0..nx {
                    data[ix * ny + iy] = raw[iy * nx + ix];
                }
            }
            snapshot.set2d(field, data)?;
        }

        debug!(file = %path.display(), nx, ny, np, "Read NetCDF snapshot");

        Ok(snapshot)
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

fn find_variable<'f>(file: &'f netcdf::File, name: &str) -> Option<netcdf::Variable<'f>> {
    file.variable(name)
        .or_else(|| file.variable(&name.to_uppercase()))
}

fn read_axis(file: &netcdf::File, name: &str) -> MetDataResult<Vec<f64>> {
    let var = find_variable(file, name)
        .ok_or_else(|| MetDataError::missing(format!("{} variable", name)))?;
    var.get_values(..)
        .map_err(|e| MetDataError::invalid(format!("Failed to read {}: {}", name, e)))
}

/// Read the first time step and convert it to seconds since 2000-01-01.
fn read_time(file: &netcdf::File) -> MetDataResult<f64> {
    let var = find_variable(file, "time").ok_or_else(|| MetDataError::missing("time variable"))?;
    let values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| MetDataError::invalid(format!("Failed to read time: {}", e)))?;
    let value = *values
        .first()
        .ok_or_else(|| MetDataError::missing("time value"))?;

    match get_str_attr(&var, "units") {
        Some(units) => cf_time_to_seconds(value, &units),
        None => Ok(value),
    }
}

/// Convert a CF time value (`<unit> since <reference>`) to seconds since 2000-01-01.
pub(crate) fn cf_time_to_seconds(value: f64, units: &str) -> MetDataResult<f64> {
    let (unit, reference) = units
        .split_once(" since ")
        .ok_or_else(|| MetDataError::InvalidTime(units.to_string()))?;

    let scale = match unit.trim().to_lowercase().as_str() {
        "seconds" | "second" | "s" => 1.0,
        "minutes" | "minute" => 60.0,
        "hours" | "hour" | "h" => 3600.0,
        "days" | "day" | "d" => 86400.0,
        other => return Err(MetDataError::InvalidTime(format!("unknown time unit '{}'", other))),
    };

    let reference = reference.trim();
    let offset = parse_time(reference).or_else(|_| {
        NaiveDateTime::parse_from_str(reference, "%Y-%m-%d %H:%M:%S")
            .map(|ndt| datetime_to_seconds(DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc)))
            .map_err(|_| MetDataError::InvalidTime(reference.to_string()))
    })?;

    Ok(offset + value * scale)
}

/// Read a variable's first time step, applying scale/offset and fill values.
fn read_scaled(var: &netcdf::Variable, expected: usize) -> MetDataResult<Vec<f32>> {
    let raw: Vec<f32> = var
        .get_values(..)
        .map_err(|e| MetDataError::invalid(format!("Failed to read {}: {}", var.name(), e)))?;
    if raw.len() < expected {
        return Err(MetDataError::invalid(format!(
            "variable {} has {} values, expected {}",
            var.name(),
            raw.len(),
            expected
        )));
    }

    let scale_factor = get_f32_attr(var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f32_attr(var, "add_offset").unwrap_or(0.0);
    let fill_value = get_f32_attr(var, "_FillValue").or_else(|| get_f32_attr(var, "missing_value"));

    Ok(raw[..expected]
        .iter()
        .map(|&val| {
            if Some(val) == fill_value || !val.is_finite() {
                f32::NAN
            } else {
                val * scale_factor + add_offset
            }
        })
        .collect())
}

/// Check if a variable has an attribute with the given name.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f32 attribute.
fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f32::try_from(attr_value).ok()
}

/// Helper to get string attribute.
fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cf_time_hours_since_epoch() {
        let secs = cf_time_to_seconds(24.0, "hours since 2000-01-01 00:00:00").unwrap();
        assert_eq!(secs, 86400.0);
    }

    #[test]
    fn test_cf_time_rejects_unknown_unit() {
        assert!(cf_time_to_seconds(1.0, "fortnights since 2000-01-01").is_err());
    }
}
