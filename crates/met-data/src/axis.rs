//! Index location on monotonic coordinate axes.

/// Bracketing node pair on an axis and the weight of the upper node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lo: usize,
    pub hi: usize,
    /// Weight of `hi`, in [0, 1]
    pub weight: f64,
}

impl Bracket {
    /// Locate `x` on an ascending or descending axis.
    ///
    /// `x` is clamped to the axis extent, so the weight never extrapolates.
    /// A single-node axis yields `lo == hi` with weight 0.
    pub fn locate(axis: &[f64], x: f64) -> Self {
        Self::locate_by(axis, x, |v| v)
    }

    /// Locate `x` with the weight computed linearly in `ln(x)`.
    ///
    /// Used for pressure coordinates; all values must be positive.
    pub fn locate_log(axis: &[f64], x: f64) -> Self {
        Self::locate_by(axis, x, f64::ln)
    }

    fn locate_by<F: Fn(f64) -> f64>(axis: &[f64], x: f64, transform: F) -> Self {
        let n = axis.len();
        if n < 2 {
            return Self { lo: 0, hi: 0, weight: 0.0 };
        }

        let ascending = axis[n - 1] > axis[0];
        let (min, max) = if ascending {
            (axis[0], axis[n - 1])
        } else {
            (axis[n - 1], axis[0])
        };
        let x = x.clamp(min, max);

        let (mut lo, mut hi) = (0, n - 1);
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if (axis[mid] <= x) == ascending {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let a = transform(axis[lo]);
        let b = transform(axis[hi]);
        let weight = ((transform(x) - a) / (b - a)).clamp(0.0, 1.0);

        Self { lo, hi, weight }
    }

    /// Index of the node nearest to the located point.
    pub fn nearest(&self) -> usize {
        if self.weight > 0.5 {
            self.hi
        } else {
            self.lo
        }
    }
}

/// Linear blend of two node values.
///
/// Degenerate weights return the node value itself, so a missing value on the
/// unused side does not leak into an exact on-node result.
#[inline]
pub fn lerp(a: f64, b: f64, weight: f64) -> f64 {
    if weight == 0.0 {
        a
    } else if weight == 1.0 {
        b
    } else {
        a + weight * (b - a)
    }
}
