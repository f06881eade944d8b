//! Catalogue of the meteorological fields a snapshot carries.
//!
//! Fields are split into pressure-level (3-D) fields, defined on every native
//! pressure level, and surface/column (2-D) fields, defined once per column.

use serde::{Deserialize, Serialize};

/// Pressure-level fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field3d {
    /// Geopotential height [km]
    Z,
    /// Temperature [K]
    T,
    /// Zonal wind [m/s]
    U,
    /// Meridional wind [m/s]
    V,
    /// Vertical velocity [hPa/s]
    W,
    /// Potential vorticity [PVU]
    Pv,
    /// Water vapor volume mixing ratio [ppv]
    H2o,
    /// Ozone volume mixing ratio [ppv]
    O3,
    /// Cloud liquid water content [kg/kg]
    Lwc,
    /// Cloud ice water content [kg/kg]
    Iwc,
    /// Cloud cover [1]
    Cc,
}

impl Field3d {
    /// Number of pressure-level fields.
    pub const COUNT: usize = 11;

    /// All pressure-level fields in storage order.
    pub const ALL: [Field3d; Self::COUNT] = [
        Field3d::Z,
        Field3d::T,
        Field3d::U,
        Field3d::V,
        Field3d::W,
        Field3d::Pv,
        Field3d::H2o,
        Field3d::O3,
        Field3d::Lwc,
        Field3d::Iwc,
        Field3d::Cc,
    ];

    /// Storage slot of this field.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short variable name used in snapshot files.
    pub fn name(self) -> &'static str {
        match self {
            Field3d::Z => "z",
            Field3d::T => "t",
            Field3d::U => "u",
            Field3d::V => "v",
            Field3d::W => "w",
            Field3d::Pv => "pv",
            Field3d::H2o => "h2o",
            Field3d::O3 => "o3",
            Field3d::Lwc => "lwc",
            Field3d::Iwc => "iwc",
            Field3d::Cc => "cc",
        }
    }

    /// Look up a field by its short name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

/// Surface and column-derived fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field2d {
    /// Surface pressure [hPa]
    Ps,
    /// Surface temperature [K]
    Ts,
    /// Surface geopotential height [km]
    Zs,
    /// Surface zonal wind [m/s]
    Us,
    /// Surface meridional wind [m/s]
    Vs,
    /// Land-sea mask [1]
    Lsm,
    /// Sea surface temperature [K]
    Sst,
    /// Boundary layer top pressure [hPa]
    Pbl,
    /// Tropopause pressure [hPa], NaN where undefined
    Pt,
    /// Tropopause geopotential height [km]
    Zt,
    /// Tropopause temperature [K]
    Tt,
    /// Tropopause water vapor [ppv]
    H2ot,
    /// Cloud top pressure [hPa]
    Pct,
    /// Cloud bottom pressure [hPa]
    Pcb,
    /// Total column cloud water [kg/m^2]
    Cl,
    /// Lifted condensation level pressure [hPa]
    Plcl,
    /// Level of free convection pressure [hPa]
    Plfc,
    /// Equilibrium level pressure [hPa]
    Pel,
    /// Convective available potential energy [J/kg]
    Cape,
    /// Convective inhibition [J/kg]
    Cin,
    /// Total column ozone [DU]
    O3c,
}

impl Field2d {
    /// Number of surface/column fields.
    pub const COUNT: usize = 21;

    /// All surface/column fields in storage order.
    pub const ALL: [Field2d; Self::COUNT] = [
        Field2d::Ps,
        Field2d::Ts,
        Field2d::Zs,
        Field2d::Us,
        Field2d::Vs,
        Field2d::Lsm,
        Field2d::Sst,
        Field2d::Pbl,
        Field2d::Pt,
        Field2d::Zt,
        Field2d::Tt,
        Field2d::H2ot,
        Field2d::Pct,
        Field2d::Pcb,
        Field2d::Cl,
        Field2d::Plcl,
        Field2d::Plfc,
        Field2d::Pel,
        Field2d::Cape,
        Field2d::Cin,
        Field2d::O3c,
    ];

    /// Storage slot of this field.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short variable name used in snapshot files.
    pub fn name(self) -> &'static str {
        match self {
            Field2d::Ps => "ps",
            Field2d::Ts => "ts",
            Field2d::Zs => "zs",
            Field2d::Us => "us",
            Field2d::Vs => "vs",
            Field2d::Lsm => "lsm",
            Field2d::Sst => "sst",
            Field2d::Pbl => "pbl",
            Field2d::Pt => "pt",
            Field2d::Zt => "zt",
            Field2d::Tt => "tt",
            Field2d::H2ot => "h2ot",
            Field2d::Pct => "pct",
            Field2d::Pcb => "pcb",
            Field2d::Cl => "cl",
            Field2d::Plcl => "plcl",
            Field2d::Plfc => "plfc",
            Field2d::Pel => "pel",
            Field2d::Cape => "cape",
            Field2d::Cin => "cin",
            Field2d::O3c => "o3c",
        }
    }

    /// Look up a field by its short name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_order_matches_index() {
        for (i, f) in Field3d::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
        for (i, f) in Field2d::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Field3d::from_name("T"), Some(Field3d::T));
        assert_eq!(Field3d::from_name("h2o"), Some(Field3d::H2o));
        assert_eq!(Field2d::from_name("plfc"), Some(Field2d::Plfc));
        assert_eq!(Field2d::from_name("nope"), None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Field3d::ALL.iter().map(|f| f.name()).collect();
        names.extend(Field2d::ALL.iter().map(|f| f.name()));
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
