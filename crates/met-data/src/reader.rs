//! Snapshot readers.
//!
//! The aggregation engine only sees the [`SnapshotReader`] trait. The default
//! [`AutoReader`] dispatches on the file extension: `.json` files go to the
//! JSON reader, `.nc`/`.nc4` files to the NetCDF reader when the `netcdf`
//! feature is enabled.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{MetDataError, MetDataResult};
use crate::fields::{Field2d, Field3d};
use crate::snapshot::Snapshot;
use crate::time::parse_time;

/// Loads one snapshot from a file.
pub trait SnapshotReader {
    /// Read the snapshot stored at `path`.
    fn read(&self, path: &Path) -> MetDataResult<Snapshot>;
}

/// Snapshot file types recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    NetCdf,
    Unknown,
}

/// Detect the snapshot file type from the file name.
pub fn detect_file_type(path: &Path) -> FileType {
    let lower = path.to_string_lossy().to_lowercase();

    if lower.ends_with(".json") {
        FileType::Json
    } else if lower.ends_with(".nc") || lower.ends_with(".nc4") || lower.ends_with(".netcdf") {
        FileType::NetCdf
    } else {
        FileType::Unknown
    }
}

/// Reader that picks the concrete reader from the file extension.
///
/// Unknown extensions are tried as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoReader;

impl SnapshotReader for AutoReader {
    fn read(&self, path: &Path) -> MetDataResult<Snapshot> {
        match detect_file_type(path) {
            FileType::Json | FileType::Unknown => JsonSnapshotReader.read(path),
            FileType::NetCdf => read_netcdf(path),
        }
    }
}

#[cfg(feature = "netcdf")]
fn read_netcdf(path: &Path) -> MetDataResult<Snapshot> {
    crate::native::NetCdfSnapshotReader::default().read(path)
}

#[cfg(not(feature = "netcdf"))]
fn read_netcdf(path: &Path) -> MetDataResult<Snapshot> {
    Err(MetDataError::UnsupportedFormat(format!(
        "{} (built without the `netcdf` feature)",
        path.display()
    )))
}

/// Time stamp in a JSON snapshot: seconds since 2000-01-01 or ISO 8601.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeValue {
    Seconds(f64),
    Iso(String),
}

/// JSON snapshot document.
///
/// Values may be `null` for missing data.
#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    time: TimeValue,
    lon: Vec<f64>,
    lat: Vec<f64>,
    p: Vec<f64>,
    #[serde(default)]
    fields3d: HashMap<String, Vec<Option<f32>>>,
    #[serde(default)]
    fields2d: HashMap<String, Vec<Option<f32>>>,
}

/// Reader for JSON snapshot documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotReader;

impl JsonSnapshotReader {
    /// Parse a snapshot from a JSON string.
    pub fn parse(&self, text: &str) -> MetDataResult<Snapshot> {
        let doc: SnapshotDocument = serde_json::from_str(text)?;

        let time = match doc.time {
            TimeValue::Seconds(secs) => secs,
            TimeValue::Iso(s) => parse_time(&s)?,
        };

        let mut snapshot = Snapshot::new(time, doc.lon, doc.lat, doc.p)?;

        for (name, values) in doc.fields3d {
            let field = Field3d::from_name(&name).ok_or_else(|| {
                MetDataError::invalid(format!("unknown pressure-level field '{}'", name))
            })?;
            snapshot.set3d(field, unpack(values))?;
        }

        for (name, values) in doc.fields2d {
            let field = Field2d::from_name(&name).ok_or_else(|| {
                MetDataError::invalid(format!("unknown surface field '{}'", name))
            })?;
            snapshot.set2d(field, unpack(values))?;
        }

        Ok(snapshot)
    }
}

impl SnapshotReader for JsonSnapshotReader {
    fn read(&self, path: &Path) -> MetDataResult<Snapshot> {
        let text = fs::read_to_string(path)?;
        let snapshot = self.parse(&text)?;
        debug!(
            file = %path.display(),
            nx = snapshot.nx(),
            ny = snapshot.ny(),
            np = snapshot.np(),
            "Read JSON snapshot"
        );
        Ok(snapshot)
    }
}

fn unpack(values: Vec<Option<f32>>) -> Vec<f32> {
    values.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect()
}
