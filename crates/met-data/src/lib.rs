//! Meteorological snapshots for zonal-mean aggregation.
//!
//! A [`Snapshot`] is one time-stamped 3-D meteorological state on a regular
//! longitude/latitude grid with native pressure levels, plus the surface and
//! column-derived 2-D fields (tropopause, convective indices, cloud
//! diagnostics, ...). Snapshots are produced by a [`SnapshotReader`]:
//!
//! - [`JsonSnapshotReader`]: self-describing JSON documents
//! - `NetCdfSnapshotReader`: CF-style NetCDF files (`netcdf` feature)
//! - [`AutoReader`]: dispatches on the file extension
//!
//! # Example
//!
//! ```ignore
//! use met_data::{AutoReader, Field3d, SnapshotReader};
//!
//! let snapshot = AutoReader.read("met_2024_01_01.json".as_ref())?;
//! let t = snapshot.value3d(Field3d::T, 0, 0, 0);
//! ```

pub mod axis;
pub mod error;
pub mod fields;
#[cfg(feature = "netcdf")]
pub mod native;
pub mod reader;
pub mod snapshot;
pub mod time;

pub use axis::{lerp, Bracket};
pub use error::{MetDataError, MetDataResult};
pub use fields::{Field2d, Field3d};
#[cfg(feature = "netcdf")]
pub use native::NetCdfSnapshotReader;
pub use reader::{detect_file_type, AutoReader, FileType, JsonSnapshotReader, SnapshotReader};
pub use snapshot::Snapshot;
pub use time::{datetime_to_seconds, parse_time, seconds_to_datetime};
