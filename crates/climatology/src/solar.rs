//! Solar zenith angle.

use std::f64::consts::PI;

/// Solar zenith angle [rad] at a time [s since 2000-01-01T00:00Z], longitude
/// and latitude [deg].
///
/// Low-precision solar ephemeris (Astronomical Almanac), good to about 0.01°
/// for the 1950–2050 period.
pub fn solar_zenith_angle(time: f64, lon: f64, lat: f64) -> f64 {
    // Days relative to 2000-01-01T12:00Z
    let d = time / 86400.0 - 0.5;

    let g = (357.529 + 0.985_600_28 * d).to_radians();
    let q = 280.459 + 0.985_647_36 * d;
    let ecliptic_lon = (q + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).to_radians();

    let obliquity = (23.439 - 0.000_000_36 * d).to_radians();
    let sin_dec = obliquity.sin() * ecliptic_lon.sin();
    let right_ascension = (obliquity.cos() * ecliptic_lon.sin()).atan2(ecliptic_lon.cos());

    // Greenwich mean / local sidereal time [h]
    let gmst = 18.697_374_558 + 24.065_709_824_419_08 * d;
    let lst = gmst + lon / 15.0;
    let hour_angle = lst / 12.0 * PI - right_ascension;

    let lat = lat.to_radians();
    let cos_sza =
        lat.sin() * sin_dec + lat.cos() * (1.0 - sin_dec * sin_dec).sqrt() * hour_angle.cos();
    cos_sza.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equinox_noon_at_equator_is_near_overhead() {
        // 2000-03-20T12:00Z is within a day of the March equinox
        let time = 79.0 * 86400.0 + 12.0 * 3600.0;
        let sza = solar_zenith_angle(time, 0.0, 0.0).to_degrees();
        assert!(sza < 5.0, "sza = {}", sza);
    }

    #[test]
    fn test_midnight_is_dark() {
        let time = 79.0 * 86400.0;
        let sza = solar_zenith_angle(time, 0.0, 0.0).to_degrees();
        assert!(sza > 170.0, "sza = {}", sza);
    }

    #[test]
    fn test_range() {
        for hour in 0..24 {
            let sza = solar_zenith_angle(hour as f64 * 3600.0, 45.0, 30.0);
            assert!((0.0..=PI).contains(&sza));
        }
    }
}
