//! Test data generators for creating synthetic meteorological snapshots.
//!
//! These generators create predictable, physically plausible fields so that
//! aggregation results can be checked against hand-computed values.

use met_data::{Field2d, Field3d, Snapshot};

/// Scale height used by the synthetic atmosphere [km].
const SCALE_HEIGHT: f64 = 7.0;

/// Reference surface pressure [hPa].
const P_REF: f64 = 1013.25;

/// Creates a regular axis of `n` values starting at `start`.
///
/// # Example
///
/// ```
/// use test_utils::regular_axis;
///
/// assert_eq!(regular_axis(-90.0, 45.0, 5), vec![-90.0, -45.0, 0.0, 45.0, 90.0]);
/// ```
pub fn regular_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Log-pressure altitude of a pressure level [km].
pub fn pressure_altitude(p: f64) -> f64 {
    SCALE_HEIGHT * (P_REF / p).ln()
}

/// Temperature of the synthetic atmosphere [K].
///
/// Standard-atmosphere lapse rate up to the tropopause at 11 km, isothermal
/// above, plus a warm equator.
pub fn synthetic_temperature(lat: f64, p: f64) -> f64 {
    let z = pressure_altitude(p);
    let base = (288.15 - 6.5 * z).max(216.65);
    base + 10.0 * lat.to_radians().cos()
}

/// Tropopause pressure of the synthetic atmosphere [hPa].
///
/// 100 hPa at the equator, 300 hPa at the poles.
pub fn synthetic_tropopause_pressure(lat: f64) -> f64 {
    let s = (lat / 90.0).abs();
    100.0 + 200.0 * s * s
}

/// Creates a snapshot with plausible values in every field.
///
/// - `z` is the log-pressure altitude, `t` follows [`synthetic_temperature`]
/// - `u` is a westerly jet `20 cos(lat)`, `v` and `w` are zero
/// - `h2o` decreases with altitude, `o3` increases
/// - tropopause fields follow [`synthetic_tropopause_pressure`]
/// - convective fields pass a CAPE threshold of 1000 J/kg only for
///   longitudes >= 0
///
/// Every value is finite, so every accumulator group receives samples.
///
/// # Example
///
/// ```
/// use met_data::Field3d;
/// use test_utils::create_test_snapshot;
///
/// let snap = create_test_snapshot(&[0.0, 90.0], &[-30.0, 30.0], &[500.0, 100.0], 0.0);
/// assert_eq!(snap.nx(), 2);
/// assert!(snap.value3d(Field3d::T, 0, 0, 0).is_finite());
/// ```
pub fn create_test_snapshot(lon: &[f64], lat: &[f64], p: &[f64], time: f64) -> Snapshot {
    let mut snap = Snapshot::new(time, lon.to_vec(), lat.to_vec(), p.to_vec())
        .expect("valid synthetic axes");

    snap.fill3d(Field3d::Z, |_, _, p| pressure_altitude(p));
    snap.fill3d(Field3d::T, |_, lat, p| synthetic_temperature(lat, p));
    snap.fill3d(Field3d::U, |_, lat, _| 20.0 * lat.to_radians().cos());
    snap.fill3d(Field3d::V, |_, _, _| 0.0);
    snap.fill3d(Field3d::W, |_, _, _| 0.0);
    snap.fill3d(Field3d::Pv, |_, lat, p| lat.signum() * 1000.0 / p);
    snap.fill3d(Field3d::H2o, |_, _, p| (1e-2 * (p / P_REF).powi(3)).max(4e-6));
    snap.fill3d(Field3d::O3, |_, _, p| 1e-7 * (P_REF / p).ln().max(0.1));
    snap.fill3d(Field3d::Lwc, |_, _, p| if p > 500.0 { 1e-5 } else { 0.0 });
    snap.fill3d(Field3d::Iwc, |_, _, p| if p <= 500.0 { 1e-6 } else { 0.0 });
    snap.fill3d(Field3d::Cc, |_, _, _| 0.5);

    snap.fill2d(Field2d::Ps, |_, _| P_REF);
    snap.fill2d(Field2d::Ts, |_, lat| synthetic_temperature(lat, P_REF));
    snap.fill2d(Field2d::Zs, |_, _| 0.0);
    snap.fill2d(Field2d::Us, |_, lat| 5.0 * lat.to_radians().cos());
    snap.fill2d(Field2d::Vs, |_, _| 0.0);
    snap.fill2d(Field2d::Lsm, |lon, _| if lon < 0.0 { 1.0 } else { 0.0 });
    snap.fill2d(Field2d::Sst, |_, lat| synthetic_temperature(lat, P_REF));
    snap.fill2d(Field2d::Pbl, |_, _| 900.0);
    snap.fill2d(Field2d::Pt, |_, lat| synthetic_tropopause_pressure(lat));
    snap.fill2d(Field2d::Zt, |_, lat| {
        pressure_altitude(synthetic_tropopause_pressure(lat))
    });
    snap.fill2d(Field2d::Tt, |_, lat| {
        synthetic_temperature(lat, synthetic_tropopause_pressure(lat))
    });
    snap.fill2d(Field2d::H2ot, |_, _| 5e-6);
    snap.fill2d(Field2d::Pct, |_, _| 400.0);
    snap.fill2d(Field2d::Pcb, |_, _| 850.0);
    snap.fill2d(Field2d::Cl, |_, _| 0.1);
    snap.fill2d(Field2d::Plcl, |_, _| 900.0);
    snap.fill2d(Field2d::Plfc, |_, _| 800.0);
    snap.fill2d(Field2d::Pel, |_, _| 250.0);
    snap.fill2d(Field2d::Cape, |lon, _| if lon >= 0.0 { 1500.0 } else { 500.0 });
    snap.fill2d(Field2d::Cin, |_, _| 20.0);
    snap.fill2d(Field2d::O3c, |_, _| 300.0);

    snap
}

/// Creates a snapshot where every field holds the same value.
///
/// Useful to check that averaging reproduces an input exactly.
pub fn create_constant_snapshot(
    lon: &[f64],
    lat: &[f64],
    p: &[f64],
    time: f64,
    value: f32,
) -> Snapshot {
    let mut snap = Snapshot::new(time, lon.to_vec(), lat.to_vec(), p.to_vec())
        .expect("valid synthetic axes");
    let n3 = snap.nx() * snap.ny() * snap.np();
    let n2 = snap.nx() * snap.ny();

    for field in Field3d::ALL {
        snap.set3d(field, vec![value; n3]).expect("matching length");
    }
    for field in Field2d::ALL {
        snap.set2d(field, vec![value; n2]).expect("matching length");
    }
    snap
}

/// Returns a copy of `snapshot` with every temperature shifted by `offset` K.
pub fn with_temperature_offset(snapshot: &Snapshot, offset: f32) -> Snapshot {
    let mut snap = snapshot.clone();
    let shifted = snap.data3d(Field3d::T).iter().map(|t| t + offset).collect();
    snap.set3d(Field3d::T, shifted).expect("matching length");
    snap
}

/// Returns a copy of `snapshot` with one surface field set to NaN everywhere.
pub fn with_missing_field(snapshot: &Snapshot, field: Field2d) -> Snapshot {
    let mut snap = snapshot.clone();
    let n2 = snap.nx() * snap.ny();
    snap.set2d(field, vec![f32::NAN; n2]).expect("matching length");
    snap
}
