//! Climatological estimates of trace species.
//!
//! The zonal-mean engine queries a [`Climatology`] for species that are not
//! part of the meteorological snapshots:
//!
//! - `zonal_mean(species, time, lat, p)` for HNO3, H2O2, HO2, O(1D)
//! - `photochemical_oh(time, lon, lat, p)` for OH, scaled with the local solar
//!   zenith angle
//!
//! [`ClimatologyDataset`] is the concrete implementation backed by
//! [`ZonalMeanTable`]s. It is loaded once and never mutated afterwards.
//! [`nat_temperature`] derives the NAT existence temperature from pressure,
//! water vapor and HNO3.

pub mod dataset;
pub mod error;
pub mod nat;
pub mod solar;
pub mod species;
pub mod table;

pub use dataset::{Climatology, ClimatologyConfig, ClimatologyDataset};
pub use error::{ClimatologyError, Result};
pub use nat::nat_temperature;
pub use solar::solar_zenith_angle;
pub use species::Species;
pub use table::{ZonalMeanTable, YEAR_SECONDS};
