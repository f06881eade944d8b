//! Trace species covered by the climatology.

use serde::{Deserialize, Serialize};

/// Trace species with a zonal-mean climatology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Nitric acid [ppv]
    Hno3,
    /// Hydroxyl radical [molec/cm^3]
    Oh,
    /// Hydrogen peroxide [ppv]
    H2o2,
    /// Hydroperoxyl radical [ppv]
    Ho2,
    /// Excited atomic oxygen O(1D) [ppv]
    O1d,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Hno3,
        Species::Oh,
        Species::H2o2,
        Species::Ho2,
        Species::O1d,
    ];

    /// Lower-case species name.
    pub fn name(self) -> &'static str {
        match self {
            Species::Hno3 => "hno3",
            Species::Oh => "oh",
            Species::H2o2 => "h2o2",
            Species::Ho2 => "ho2",
            Species::O1d => "o1d",
        }
    }

    /// Control-file key naming the table file for this species.
    pub fn filename_key(self) -> String {
        format!("CLIM_{}_FILENAME", self.name().to_uppercase())
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
