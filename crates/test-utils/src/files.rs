//! Helpers for writing test inputs to disk.
//!
//! Snapshots are written in the JSON snapshot format understood by
//! `met_data::JsonSnapshotReader`, with missing values as `null`.

use std::io::Write;
use std::path::{Path, PathBuf};

use met_data::{Field2d, Field3d, Snapshot};
use serde_json::{json, Map, Value};

/// Serializes a snapshot to the JSON snapshot format.
pub fn snapshot_to_json(snapshot: &Snapshot) -> String {
    let mut fields3d = Map::new();
    for field in Field3d::ALL {
        fields3d.insert(field.name().to_string(), values(snapshot.data3d(field)));
    }

    let mut fields2d = Map::new();
    for field in Field2d::ALL {
        fields2d.insert(field.name().to_string(), values(snapshot.data2d(field)));
    }

    json!({
        "time": snapshot.time,
        "lon": snapshot.lon,
        "lat": snapshot.lat,
        "p": snapshot.p,
        "fields3d": fields3d,
        "fields2d": fields2d,
    })
    .to_string()
}

fn values(data: &[f32]) -> Value {
    Value::Array(
        data.iter()
            .map(|&v| if v.is_finite() { json!(v) } else { Value::Null })
            .collect(),
    )
}

/// Writes `snapshot` as `<dir>/<name>` and returns the path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_snapshot(dir: &Path, name: &str, snapshot: &Snapshot) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, snapshot_to_json(snapshot)).expect("write snapshot file");
    path
}

/// Writes control-file text to a temporary file.
///
/// # Panics
///
/// Panics if the temporary file cannot be created.
pub fn write_control(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("met_zm")
        .suffix(".ctl")
        .tempfile()
        .expect("create control file");
    file.write_all(text.as_bytes()).expect("write control file");
    file
}
