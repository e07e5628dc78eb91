//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{DMatrix, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (in-plane quantities).
pub type R2 = Vector2<Scalar>;
/// Dense 2D array indexed `(row, col)`, where rows follow y and columns follow x.
pub type Grid2 = DMatrix<Scalar>;

/// Generates `n` linearly spaced samples in [start, stop], endpoints included.
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as Scalar })
                .collect()
        }
    }
}

/// Trapezoidal quadrature weights for samples at abscissae `xs`.
///
/// `Σ w[k]·f(xs[k])` equals the composite trapezoid rule over the samples, so
/// a double integral can be accumulated without storing the integrand.
#[must_use]
pub fn trapezoid_weights(xs: &[Scalar]) -> Vec<Scalar> {
    let n = xs.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|k| {
            let left = if k > 0 { xs[k] - xs[k - 1] } else { 0.0 };
            let right = if k + 1 < n { xs[k + 1] - xs[k] } else { 0.0 };
            0.5 * (left + right)
        })
        .collect()
}

/// Median of `values`, reordering the slice in place.
///
/// An even count yields the mean of the two middle values. Returns `None` for
/// an empty slice.
#[must_use]
pub fn median_in_place(values: &mut [Scalar]) -> Option<Scalar> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    values.sort_unstable_by(Scalar::total_cmp);
    let mid = n / 2;
    if n % 2 == 1 {
        Some(values[mid])
    } else {
        Some(0.5 * (values[mid - 1] + values[mid]))
    }
}

/// Element-wise Euclidean norm of a pair of component arrays.
#[must_use]
pub fn hypot_grid(a: &Grid2, b: &Grid2) -> Grid2 {
    a.zip_map(b, Scalar::hypot)
}
