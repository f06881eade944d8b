//! Pressure-altitude conversion and humidity diagnostics.
//!
//! Pressures are in hPa, temperatures in K and humidity as water vapor
//! volume mixing ratio.

/// Scale height [km].
pub const H0: f64 = 7.0;

/// Reference pressure [hPa].
pub const P0: f64 = 1013.25;

/// Freezing point [K].
pub const T0: f64 = 273.15;

/// Ratio of molar masses of water vapor and dry air.
pub const EPS: f64 = 18.01528 / 28.9644;

/// Lower bound for water vapor mixing ratios.
const H2O_MIN: f64 = 1e-7;

/// Log-pressure altitude [km] of a pressure level.
#[inline]
pub fn z_from_p(p: f64) -> f64 {
    H0 * (P0 / p).ln()
}

/// Pressure [hPa] of a log-pressure altitude.
#[inline]
pub fn p_from_z(z: f64) -> f64 {
    P0 * (-z / H0).exp()
}

/// Saturation pressure over water [hPa] (Magnus formula).
pub fn psat(t: f64) -> f64 {
    6.112 * (17.62 * (t - T0) / (243.12 + t - T0)).exp()
}

/// Saturation pressure over ice [hPa] (Marti and Mauersberger).
pub fn psice(t: f64) -> f64 {
    0.01 * 10f64.powf(-2663.5 / t + 12.537)
}

/// Partial water vapor pressure [hPa].
pub fn pw(p: f64, h2o: f64) -> f64 {
    let h = h2o.max(H2O_MIN);
    p * h / (1.0 + (1.0 - EPS) * h)
}

/// Relative humidity over water [%].
pub fn rh(p: f64, t: f64, h2o: f64) -> f64 {
    pw(p, h2o) / psat(t) * 100.0
}

/// Relative humidity over ice [%].
pub fn rhice(p: f64, t: f64, h2o: f64) -> f64 {
    pw(p, h2o) / psice(t) * 100.0
}

/// Dew point temperature [K].
pub fn tdew(p: f64, h2o: f64) -> f64 {
    let x = (pw(p, h2o) / 6.112).ln();
    T0 + 243.12 * x / (17.62 - x)
}

/// Frost point temperature [K].
pub fn tice(p: f64, h2o: f64) -> f64 {
    -2663.5 / ((100.0 * pw(p, h2o)).log10() - 12.537)
}
