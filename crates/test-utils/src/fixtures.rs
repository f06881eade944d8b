//! Common test fixtures for zonal-mean tests.
//!
//! Pre-defined axes and control-file snippets that represent common
//! scenarios in meteorological aggregation.

/// Common axis definitions.
pub mod axes {
    /// Four longitudes covering the globe in the -180..180 convention.
    pub const LON_GLOBAL: [f64; 4] = [-180.0, -90.0, 0.0, 90.0];

    /// Four longitudes in the 0..360 convention.
    pub const LON_360: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

    /// Coarse latitudes from pole to pole.
    pub const LAT_COARSE: [f64; 5] = [-90.0, -45.0, 0.0, 45.0, 90.0];

    /// Three latitudes around the equator.
    pub const LAT_TROPICS: [f64; 3] = [-20.0, 0.0, 20.0];

    /// Native pressure levels, descending [hPa].
    pub const P_LEVELS: [f64; 5] = [1000.0, 850.0, 500.0, 250.0, 100.0];

    /// A single pressure level [hPa].
    pub const P_SINGLE: [f64; 1] = [500.0];
}

/// Common times in seconds since 2000-01-01T00:00:00Z.
pub mod times {
    /// 2000-01-01T00:00:00Z
    pub const EPOCH: f64 = 0.0;

    /// 2000-01-01T06:00:00Z
    pub const PLUS_6H: f64 = 21_600.0;

    /// 2000-03-20T12:00:00Z, close to the vernal equinox at noon UTC
    pub const EQUINOX_NOON: f64 = 79.0 * 86_400.0 + 43_200.0;
}

/// Control-file snippets.
pub mod control {
    /// Empty control file: every parameter keeps its default.
    pub const EMPTY: &str = "";

    /// Three regular levels between 0 and 10 km, 45 degree latitude bins.
    pub const REGULAR: &str = "\
# Zonal-mean grid
ZM_Z0 = 0
ZM_Z1 = 10
ZM_DZ = 5
ZM_DLAT = 45
";

    /// Convective threshold that only deep convection passes.
    pub const DEEP_CONVECTION: &str = "\
CONV_CAPE = 1000
CONV_CIN = 50
";

    /// A malformed line without a value separator.
    pub const MALFORMED: &str = "ZM_Z0 0\n";
}
