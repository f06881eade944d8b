//! In-memory meteorological snapshot.

use chrono::{DateTime, Utc};

use crate::error::{MetDataError, MetDataResult};
use crate::fields::{Field2d, Field3d};
use crate::time::seconds_to_datetime;

/// One time-stamped meteorological state on a regular lon/lat grid with
/// native pressure levels.
///
/// 3-D values are stored longitude-major: `(ix * ny + iy) * np + ip`.
/// 2-D values are stored as `ix * ny + iy`. Missing values are NaN.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Seconds since 2000-01-01T00:00:00Z
    pub time: f64,
    /// Longitudes [deg], monotonic
    pub lon: Vec<f64>,
    /// Latitudes [deg], monotonic
    pub lat: Vec<f64>,
    /// Native pressure levels [hPa], monotonic (usually descending)
    pub p: Vec<f64>,
    fields3d: Vec<Vec<f32>>,
    fields2d: Vec<Vec<f32>>,
}

impl Snapshot {
    /// Create a snapshot with every field filled with NaN.
    pub fn new(time: f64, lon: Vec<f64>, lat: Vec<f64>, p: Vec<f64>) -> MetDataResult<Self> {
        if lon.is_empty() {
            return Err(MetDataError::missing("longitude axis is empty"));
        }
        if lat.is_empty() {
            return Err(MetDataError::missing("latitude axis is empty"));
        }
        if p.is_empty() {
            return Err(MetDataError::missing("pressure axis is empty"));
        }
        check_monotonic("longitude", &lon)?;
        check_monotonic("latitude", &lat)?;
        check_monotonic("pressure", &p)?;
        if p.iter().any(|&v| v <= 0.0) {
            return Err(MetDataError::invalid("pressure levels must be positive"));
        }

        let n3 = lon.len() * lat.len() * p.len();
        let n2 = lon.len() * lat.len();

        Ok(Self {
            time,
            lon,
            lat,
            p,
            fields3d: vec![vec![f32::NAN; n3]; Field3d::COUNT],
            fields2d: vec![vec![f32::NAN; n2]; Field2d::COUNT],
        })
    }

    /// Number of longitudes.
    pub fn nx(&self) -> usize {
        self.lon.len()
    }

    /// Number of latitudes.
    pub fn ny(&self) -> usize {
        self.lat.len()
    }

    /// Number of native pressure levels.
    pub fn np(&self) -> usize {
        self.p.len()
    }

    /// Snapshot time as a UTC date/time.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        seconds_to_datetime(self.time)
    }

    /// Smallest and largest latitude.
    pub fn lat_range(&self) -> (f64, f64) {
        axis_range(&self.lat)
    }

    /// Smallest and largest longitude.
    pub fn lon_range(&self) -> (f64, f64) {
        axis_range(&self.lon)
    }

    /// Smallest and largest native pressure.
    pub fn pressure_range(&self) -> (f64, f64) {
        axis_range(&self.p)
    }

    /// Flat index of a 3-D value.
    #[inline]
    pub fn index3d(&self, ix: usize, iy: usize, ip: usize) -> usize {
        (ix * self.ny() + iy) * self.np() + ip
    }

    /// Flat index of a 2-D value.
    #[inline]
    pub fn index2d(&self, ix: usize, iy: usize) -> usize {
        ix * self.ny() + iy
    }

    /// Value of a pressure-level field at a grid node.
    #[inline]
    pub fn value3d(&self, field: Field3d, ix: usize, iy: usize, ip: usize) -> f32 {
        self.fields3d[field.index()][self.index3d(ix, iy, ip)]
    }

    /// Value of a surface/column field at a grid node.
    #[inline]
    pub fn value2d(&self, field: Field2d, ix: usize, iy: usize) -> f32 {
        self.fields2d[field.index()][self.index2d(ix, iy)]
    }

    /// Raw storage of a pressure-level field.
    pub fn data3d(&self, field: Field3d) -> &[f32] {
        &self.fields3d[field.index()]
    }

    /// Raw storage of a surface/column field.
    pub fn data2d(&self, field: Field2d) -> &[f32] {
        &self.fields2d[field.index()]
    }

    /// Replace a pressure-level field.
    pub fn set3d(&mut self, field: Field3d, data: Vec<f32>) -> MetDataResult<()> {
        let expected = self.nx() * self.ny() * self.np();
        if data.len() != expected {
            return Err(MetDataError::invalid(format!(
                "field '{}' has {} values, expected {}",
                field.name(),
                data.len(),
                expected
            )));
        }
        self.fields3d[field.index()] = data;
        Ok(())
    }

    /// Replace a surface/column field.
    pub fn set2d(&mut self, field: Field2d, data: Vec<f32>) -> MetDataResult<()> {
        let expected = self.nx() * self.ny();
        if data.len() != expected {
            return Err(MetDataError::invalid(format!(
                "field '{}' has {} values, expected {}",
                field.name(),
                data.len(),
                expected
            )));
        }
        self.fields2d[field.index()] = data;
        Ok(())
    }

    /// Fill a pressure-level field from a function of (lon, lat, p).
    pub fn fill3d<F>(&mut self, field: Field3d, f: F)
    where
        F: Fn(f64, f64, f64) -> f64,
    {
        let (nx, ny, np) = (self.nx(), self.ny(), self.np());
        let mut data = Vec::with_capacity(nx * ny * np);
        for ix in 0..nx {
            for iy in 0..ny {
                for ip in 0..np {
                    data.push(f(self.lon[ix], self.lat[iy], self.p[ip]) as f32);
                }
            }
        }
        self.fields3d[field.index()] = data;
    }

    /// Fill a surface/column field from a function of (lon, lat).
    pub fn fill2d<F>(&mut self, field: Field2d, f: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        let (nx, ny) = (self.nx(), self.ny());
        let mut data = Vec::with_capacity(nx * ny);
        for ix in 0..nx {
            for iy in 0..ny {
                data.push(f(self.lon[ix], self.lat[iy]) as f32);
            }
        }
        self.fields2d[field.index()] = data;
    }
}

fn axis_range(axis: &[f64]) -> (f64, f64) {
    let first = axis[0];
    let last = axis[axis.len() - 1];
    (first.min(last), first.max(last))
}

fn check_monotonic(name: &str, axis: &[f64]) -> MetDataResult<()> {
    if axis.iter().any(|v| !v.is_finite()) {
        return Err(MetDataError::invalid(format!("{} axis has non-finite values", name)));
    }
    if axis.len() < 2 {
        return Ok(());
    }
    let ascending = axis.windows(2).all(|w| w[1] > w[0]);
    let descending = axis.windows(2).all(|w| w[1] < w[0]);
    if !ascending && !descending {
        return Err(MetDataError::invalid(format!(
            "{} axis is not strictly monotonic",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Snapshot {
        Snapshot::new(
            0.0,
            vec![0.0, 10.0, 20.0],
            vec![-10.0, 0.0],
            vec![1000.0, 500.0, 100.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_fills_nan() {
        let snap = small();
        assert!(snap.value3d(Field3d::T, 2, 1, 2).is_nan());
        assert!(snap.value2d(Field2d::Pt, 0, 0).is_nan());
        assert_eq!(snap.data3d(Field3d::T).len(), 18);
        assert_eq!(snap.data2d(Field2d::Ps).len(), 6);
    }

    #[test]
    fn test_fill_and_index() {
        let mut snap = small();
        snap.fill3d(Field3d::T, |lon, lat, p| lon + lat * 100.0 + p * 10_000.0);
        assert_eq!(snap.value3d(Field3d::T, 1, 0, 1), (10.0 - 1000.0 + 5_000_000.0) as f32);
        snap.fill2d(Field2d::Ps, |lon, _lat| 1000.0 + lon);
        assert_eq!(snap.value2d(Field2d::Ps, 2, 1), 1020.0);
    }

    #[test]
    fn test_set_rejects_wrong_length() {
        let mut snap = small();
        assert!(snap.set3d(Field3d::T, vec![0.0; 5]).is_err());
        assert!(snap.set2d(Field2d::Ps, vec![0.0; 6]).is_ok());
    }

    #[test]
    fn test_rejects_non_monotonic_axis() {
        let result = Snapshot::new(0.0, vec![0.0, 10.0, 5.0], vec![0.0], vec![500.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_axis() {
        assert!(Snapshot::new(0.0, vec![], vec![0.0], vec![500.0]).is_err());
    }

    #[test]
    fn test_ranges() {
        let snap = small();
        assert_eq!(snap.lat_range(), (-10.0, 0.0));
        assert_eq!(snap.pressure_range(), (100.0, 1000.0));
    }
}
