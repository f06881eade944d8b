//! Multi-field interpolation of a snapshot at a query point.
//!
//! The bracketing nodes and weights are located once per query and then
//! applied to every field. Horizontal interpolation is bilinear, vertical
//! interpolation is linear in log-pressure. Queries are clamped to the
//! snapshot extent, so there is no extrapolation.

use met_data::{lerp, Bracket, Field2d, Field3d, Snapshot};

/// Bracketing nodes and weights of one query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationWeights {
    pub lon: Bracket,
    pub lat: Bracket,
    pub p: Bracket,
}

impl InterpolationWeights {
    /// Locate `(p, lon, lat)` in `snapshot`.
    ///
    /// Negative longitudes are shifted by 360 degrees when the snapshot uses
    /// the 0..360 convention.
    pub fn locate(snapshot: &Snapshot, p: f64, lon: f64, lat: f64) -> Self {
        let (_, lon_max) = snapshot.lon_range();
        let lon = if lon < 0.0 && lon_max > 180.0 {
            lon + 360.0
        } else {
            lon
        };

        Self {
            lon: Bracket::locate(&snapshot.lon, lon),
            lat: Bracket::locate(&snapshot.lat, lat),
            p: Bracket::locate_log(&snapshot.p, p),
        }
    }

    /// Interpolate a pressure-level field.
    ///
    /// Non-finite contributing nodes propagate as NaN.
    pub fn interpolate3d(&self, snapshot: &Snapshot, field: Field3d) -> f64 {
        let column = |ix: usize, iy: usize| {
            lerp(
                snapshot.value3d(field, ix, iy, self.p.lo) as f64,
                snapshot.value3d(field, ix, iy, self.p.hi) as f64,
                self.p.weight,
            )
        };
        self.bilinear(column)
    }

    /// Interpolate a surface or column field.
    ///
    /// If any of the four corners is missing, the nearest corner's value is
    /// returned instead, which may itself be missing.
    pub fn interpolate2d(&self, snapshot: &Snapshot, field: Field2d) -> f64 {
        let value = |ix: usize, iy: usize| snapshot.value2d(field, ix, iy) as f64;

        let corners = [
            value(self.lon.lo, self.lat.lo),
            value(self.lon.lo, self.lat.hi),
            value(self.lon.hi, self.lat.lo),
            value(self.lon.hi, self.lat.hi),
        ];
        if corners.iter().any(|v| !v.is_finite()) {
            return value(self.lon.nearest(), self.lat.nearest());
        }

        self.bilinear(value)
    }

    fn bilinear<F: Fn(usize, usize) -> f64>(&self, value: F) -> f64 {
        let west = lerp(
            value(self.lon.lo, self.lat.lo),
            value(self.lon.lo, self.lat.hi),
            self.lat.weight,
        );
        let east = lerp(
            value(self.lon.hi, self.lat.lo),
            value(self.lon.hi, self.lat.hi),
            self.lat.weight,
        );
        lerp(west, east, self.lon.weight)
    }
}

/// Every snapshot field interpolated at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct MetSample {
    fields3d: [f64; Field3d::COUNT],
    fields2d: [f64; Field2d::COUNT],
}

impl MetSample {
    /// Value of a pressure-level field.
    pub fn get3d(&self, field: Field3d) -> f64 {
        self.fields3d[field.index()]
    }

    /// Value of a surface or column field.
    pub fn get2d(&self, field: Field2d) -> f64 {
        self.fields2d[field.index()]
    }
}

/// Interpolate every field of `snapshot` at `(p, lon, lat)` in one pass.
pub fn interpolate_all(snapshot: &Snapshot, p: f64, lon: f64, lat: f64) -> MetSample {
    let weights = InterpolationWeights::locate(snapshot, p, lon, lat);

    let mut fields3d = [f64::NAN; Field3d::COUNT];
    for field in Field3d::ALL {
        fields3d[field.index()] = weights.interpolate3d(snapshot, field);
    }

    let mut fields2d = [f64::NAN; Field2d::COUNT];
    for field in Field2d::ALL {
        fields2d[field.index()] = weights.interpolate2d(snapshot, field);
    }

    MetSample { fields3d, fields2d }
}
