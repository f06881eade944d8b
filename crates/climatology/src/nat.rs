//! Nitric acid trihydrate (NAT) existence temperature.

/// Lower bound for the water vapor mixing ratio [ppv].
const H2O_FLOOR: f64 = 0.1e-6;

/// hPa per Torr.
const HPA_PER_TORR: f64 = 1.333224;

/// NAT existence temperature [K] after Hanson and Mauersberger (1988).
///
/// `p` in hPa, `h2o` and `hno3` as volume mixing ratios.
pub fn nat_temperature(p: f64, h2o: f64, hno3: f64) -> f64 {
    let h2o = h2o.max(H2O_FLOOR);

    // Partial pressures [Torr]
    let p_hno3 = hno3 * p / HPA_PER_TORR;
    let p_h2o = h2o * p / HPA_PER_TORR;

    let a = 0.009179 - 0.00088 * p_h2o.log10();
    let b = (38.9855 - p_hno3.log10() - 2.7836 * p_h2o.log10()) / a;
    let c = -11397.0 / a;

    let root = (b * b - 4.0 * c).sqrt();
    let x1 = (-b + root) / 2.0;
    let x2 = (-b - root) / 2.0;
    if x2 > 0.0 {
        x2
    } else {
        x1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_typical_polar_stratosphere() {
        // 50 hPa, 5 ppmv H2O, 10 ppbv HNO3
        assert_approx_eq!(nat_temperature(50.0, 5e-6, 10e-9), 195.7423, 1e-3);
    }

    #[test]
    fn test_h2o_floor() {
        let dry = nat_temperature(50.0, 0.0, 10e-9);
        let floor = nat_temperature(50.0, 1e-7, 10e-9);
        assert_eq!(dry, floor);
        assert_approx_eq!(dry, 180.7961, 1e-3);
    }

    #[test]
    fn test_more_hno3_raises_tnat() {
        assert!(nat_temperature(50.0, 5e-6, 20e-9) > nat_temperature(50.0, 5e-6, 10e-9));
    }

    #[test]
    fn test_zero_hno3_is_not_finite() {
        assert!(!nat_temperature(50.0, 5e-6, 0.0).is_finite());
    }
}
