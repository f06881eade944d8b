//! Zonal-mean aggregation of meteorological snapshots.
//!
//! Converts a sequence of gridded snapshots into a latitude-pressure
//! cross-section. For every native longitude column inside the configured
//! band and every (level, latitude) cell of the output grid, the snapshot is
//! interpolated, humidity diagnostics and climatological species are
//! derived, and the result is folded into the cell's accumulators.
//!
//! # Example
//!
//! ```ignore
//! use climatology::ClimatologyDataset;
//! use met_data::AutoReader;
//! use zonal_mean::{ControlFile, ZonalMeanConfig, ZonalMeanEngine};
//!
//! let control = ControlFile::load("zm.ctl".as_ref())?;
//! let config = ZonalMeanConfig::from_control(&control)?;
//! let clim = ClimatologyDataset::load(&config.climatology)?;
//!
//! let mut engine = ZonalMeanEngine::new(&config, &clim);
//! engine.process_files(&AutoReader, &files)?;
//! engine.finish()?.write("zm.tab".as_ref())?;
//! ```

pub mod accumulator;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod output;
pub mod thermo;

pub use accumulator::{
    AccumulatorGrid, Cell, ClimatologySample, ConvectiveGate, ConvectiveSample, Group,
    PrimarySample, Record, SamplePoint, TropopauseSample,
};
pub use config::ZonalMeanConfig;
pub use control::ControlFile;
pub use engine::{ZonalMean, ZonalMeanEngine};
pub use error::{Result, ZonalMeanError};
pub use grid::{GridBuilder, ZonalGrid};
pub use interpolation::{interpolate_all, InterpolationWeights, MetSample};
pub use output::{format_g, write_table};
