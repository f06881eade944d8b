//! The climatology dataset and its query interface.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::solar::solar_zenith_angle;
use crate::species::Species;
use crate::table::ZonalMeanTable;

/// Largest solar zenith angle used for the diurnal OH scaling [deg].
const OH_SZA_CAP_DEG: f64 = 85.0;

/// Read-only source of climatological trace-gas estimates.
pub trait Climatology {
    /// Zonal-mean value of `species` at a time [s since 2000-01-01],
    /// latitude [deg] and pressure [hPa]. NaN when no data is available.
    fn zonal_mean(&self, species: Species, time: f64, lat: f64, p: f64) -> f64;

    /// OH concentration [molec/cm^3] including its dependence on local solar
    /// time, hence on longitude.
    fn photochemical_oh(&self, time: f64, lon: f64, lat: f64, p: f64) -> f64;
}

/// Where to load the climatology from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClimatologyConfig {
    /// Table file per species; species without an entry are not loaded.
    pub files: BTreeMap<Species, PathBuf>,
    /// Diurnal OH scaling coefficient; values <= 0 disable the scaling.
    pub oh_chem_beta: f64,
}

/// Zonal-mean tables for each loaded species.
#[derive(Debug, Clone, Default)]
pub struct ClimatologyDataset {
    tables: HashMap<Species, ZonalMeanTable>,
    oh_chem_beta: f64,
}

impl ClimatologyDataset {
    /// Create an empty dataset.
    pub fn new(oh_chem_beta: f64) -> Self {
        Self {
            tables: HashMap::new(),
            oh_chem_beta,
        }
    }

    /// Add a table, replacing any previous one for the species.
    pub fn with_table(mut self, species: Species, table: ZonalMeanTable) -> Self {
        self.tables.insert(species, table);
        self
    }

    /// Load every configured table.
    pub fn load(config: &ClimatologyConfig) -> Result<Self> {
        let mut dataset = Self::new(config.oh_chem_beta);

        for (species, path) in &config.files {
            let table = ZonalMeanTable::load(path)?;
            info!(species = %species, file = %path.display(), "Loaded climatology table");
            dataset.tables.insert(*species, table);
        }

        for species in Species::ALL {
            if !dataset.has(species) {
                warn!(species = %species, "No climatology loaded, output will report no data");
            }
        }

        Ok(dataset)
    }

    /// Whether a table is loaded for `species`.
    pub fn has(&self, species: Species) -> bool {
        self.tables.contains_key(&species)
    }
}

impl Climatology for ClimatologyDataset {
    fn zonal_mean(&self, species: Species, time: f64, lat: f64, p: f64) -> f64 {
        match self.tables.get(&species) {
            Some(table) => table.evaluate(time, lat, p),
            None => f64::NAN,
        }
    }

    fn photochemical_oh(&self, time: f64, lon: f64, lat: f64, p: f64) -> f64 {
        let oh = self.zonal_mean(Species::Oh, time, lat, p);
        if self.oh_chem_beta <= 0.0 {
            return oh;
        }

        let sza = solar_zenith_angle(time, lon, lat).min(OH_SZA_CAP_DEG.to_radians());
        oh * (-self.oh_chem_beta / sza.cos()).exp()
    }
}
