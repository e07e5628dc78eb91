//! In-plane magnetic field as the discrete curl of `Az`.
//!
//! For `A = Az·ẑ`, `B = ∇ × A = (∂Az/∂y, −∂Az/∂x)`. Both partials are estimated
//! at several stencil widths and reduced by the median, which suppresses the
//! local quadrature noise introduced by distance clipping.

use std::ops::Range;

use crate::config::{check_at_least, check_fine_size, check_shape};
use crate::constants::{FIRST_STENCIL_OFFSET, MIN_SMOOTH};
use crate::errors::{Result, Stage};
use crate::grid::ComputationGrid;
use crate::math::{hypot_grid, median_in_place, Grid2, Scalar, R2};

use super::potential::VectorPotential;

/// In-plane flux density on the fine grid.
///
/// Only the square `interior × interior` holds values; every other entry is NaN.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarMagneticField {
    /// x component `Bx`.
    pub bx: Grid2,
    /// y component `By`.
    pub by: Grid2,
    interior: Range<usize>,
}

impl PlanarMagneticField {
    /// Row and column index range holding defined values.
    #[must_use]
    pub fn interior(&self) -> Range<usize> {
        self.interior.clone()
    }

    /// True when `(row, col)` lies in the differentiated interior.
    #[must_use]
    pub fn is_defined(&self, row: usize, col: usize) -> bool {
        self.interior.contains(&row) && self.interior.contains(&col)
    }

    /// `(Bx, By)` at `(row, col)`, or `None` outside the interior.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<R2> {
        self.is_defined(row, col)
            .then(|| R2::new(self.bx[(row, col)], self.by[(row, col)]))
    }

    /// `|B|` per grid point (NaN outside the interior).
    #[must_use]
    pub fn magnitude(&self) -> Grid2 {
        hypot_grid(&self.bx, &self.by)
    }

    /// `(rows, cols)` shape of both component arrays.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.bx.shape()
    }
}

/// Median-filtered central differences of `Az`.
#[derive(Debug, Clone, Copy)]
pub struct FieldDifferentiator<'a> {
    grid: &'a ComputationGrid,
    smooth: usize,
}

impl<'a> FieldDifferentiator<'a> {
    /// Differentiator on `grid` combining offsets `k ∈ [2, smooth)`.
    ///
    /// Rejects `smooth < 3` and grids narrower than `2·smooth + 2`.
    pub fn new(grid: &'a ComputationGrid, smooth: usize) -> Result<Self> {
        let at = |e: crate::config::ConfigError| e.at(Stage::Differentiation);
        check_at_least("smooth", smooth, MIN_SMOOTH).map_err(at)?;
        check_fine_size(grid.size(), smooth).map_err(at)?;
        Ok(Self { grid, smooth })
    }

    /// Index range on which the field is computed.
    #[must_use]
    pub fn interior(&self) -> Range<usize> {
        self.smooth..self.grid.size() - self.smooth
    }

    /// Stencil offsets combined per point.
    fn offsets(&self) -> Range<usize> {
        FIRST_STENCIL_OFFSET..self.smooth
    }

    /// Computes `(Bx, By) = (median ∂Az/∂y, −median ∂Az/∂x)` on the interior.
    pub fn curl(&self, potential: &VectorPotential) -> Result<PlanarMagneticField> {
        check_shape("Az", self.grid.shape(), potential.shape())
            .map_err(|e| e.at(Stage::Differentiation))?;

        let (x, y, az) = (self.grid.x(), self.grid.y(), &potential.az);
        let n = self.grid.size();
        let interior = self.interior();
        log::debug!(
            "differentiating Az on interior {interior:?} with {} offsets per point",
            self.offsets().len()
        );

        let mut bx = Grid2::from_element(n, n, Scalar::NAN);
        let mut by = Grid2::from_element(n, n, Scalar::NAN);
        let mut d_dx: Vec<Scalar> = Vec::with_capacity(self.offsets().len());
        let mut d_dy: Vec<Scalar> = Vec::with_capacity(self.offsets().len());

        for i in interior.clone() {
            for j in interior.clone() {
                d_dx.clear();
                d_dy.clear();
                for k in self.offsets() {
                    let (hi, lo) = (i + k + 1, i - k);
                    d_dx.push((az[(j, hi)] - az[(j, lo)]) / (x[(j, hi)] - x[(j, lo)]));
                    let (hi, lo) = (j + k + 1, j - k);
                    d_dy.push((az[(hi, i)] - az[(lo, i)]) / (y[(hi, i)] - y[(lo, i)]));
                }
                if let (Some(daz_dy), Some(daz_dx)) =
                    (median_in_place(&mut d_dy), median_in_place(&mut d_dx))
                {
                    bx[(j, i)] = daz_dy;
                    by[(j, i)] = -daz_dx;
                }
            }
        }

        Ok(PlanarMagneticField { bx, by, interior })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn potential_from(grid: &ComputationGrid, f: impl Fn(Scalar, Scalar) -> Scalar) -> VectorPotential {
        let (x, y) = (grid.x(), grid.y());
        VectorPotential { az: x.zip_map(y, f) }
    }

    #[test]
    fn smooth_below_three_is_rejected() {
        let grid = ComputationGrid::new(20, 1.0);
        for smooth in 0..3 {
            let err = FieldDifferentiator::new(&grid, smooth).unwrap_err();
            assert_eq!(err.stage(), Stage::Differentiation);
        }
        assert!(FieldDifferentiator::new(&grid, 3).is_ok());
    }

    #[test]
    fn narrow_grid_is_rejected() {
        let grid = ComputationGrid::new(9, 1.0);
        assert!(FieldDifferentiator::new(&grid, 4).is_err());
        assert!(FieldDifferentiator::new(&grid, 3).is_ok());
    }

    #[test]
    fn smooth_three_is_plain_central_difference() {
        let grid = ComputationGrid::new(16, 1.0);
        let potential = potential_from(&grid, |x, y| (1.3 * x).sin() * (0.7 * y).cos() + x * x * y);
        let field = FieldDifferentiator::new(&grid, 3).unwrap().curl(&potential).unwrap();
        let (x, y, az) = (grid.x(), grid.y(), &potential.az);
        for j in 3..13 {
            for i in 3..13 {
                let daz_dx = (az[(j, i + 3)] - az[(j, i - 2)]) / (x[(j, i + 3)] - x[(j, i - 2)]);
                let daz_dy = (az[(j + 3, i)] - az[(j - 2, i)]) / (y[(j + 3, i)] - y[(j - 2, i)]);
                assert_eq!(field.bx[(j, i)], daz_dy);
                assert_eq!(field.by[(j, i)], -daz_dx);
            }
        }
    }

    #[test]
    fn linear_potential_gives_uniform_field() {
        let grid = ComputationGrid::new(24, 1.5);
        let potential = potential_from(&grid, |x, y| 2.0 * x - 0.5 * y + 1.0);
        let field = FieldDifferentiator::new(&grid, 6).unwrap().curl(&potential).unwrap();
        for j in field.interior() {
            for i in field.interior() {
                let b = field.get(j, i).unwrap();
                assert_relative_eq!(b.x, -0.5, epsilon = 1.0e-10);
                assert_relative_eq!(b.y, -2.0, epsilon = 1.0e-10);
            }
        }
    }

    #[test]
    fn margin_is_unset() {
        let grid = ComputationGrid::new(12, 1.0);
        let potential = potential_from(&grid, |x, _| x);
        let field = FieldDifferentiator::new(&grid, 4).unwrap().curl(&potential).unwrap();
        assert_eq!(field.interior(), 4..8);
        assert!(field.get(3, 5).is_none());
        assert!(field.get(5, 8).is_none());
        assert!(field.bx[(0, 0)].is_nan());
        assert!(field.get(4, 7).is_some());
    }

    #[test]
    fn median_rejects_isolated_spike() {
        let grid = ComputationGrid::new(30, 1.0);
        let mut potential = potential_from(&grid, |x, _| 3.0 * x);
        // Corrupt one sample that only the k = 2 stencil of column 10 reads.
        potential.az[(15, 13)] += 10.0;
        let field = FieldDifferentiator::new(&grid, 6).unwrap().curl(&potential).unwrap();
        assert_relative_eq!(field.by[(15, 10)], -3.0, epsilon = 1.0e-9);
    }

    #[test]
    fn curl_is_deterministic() {
        let grid = ComputationGrid::new(20, 1.2);
        let potential = potential_from(&grid, |x, y| (x * y).exp() - y.powi(3));
        let differentiator = FieldDifferentiator::new(&grid, 5).unwrap();
        let first = differentiator.curl(&potential).unwrap();
        let second = differentiator.curl(&potential).unwrap();
        for (a, b) in first.bx.iter().zip(second.bx.iter()).chain(first.by.iter().zip(second.by.iter())) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn mismatched_potential_is_rejected() {
        let grid = ComputationGrid::new(12, 1.0);
        let other = ComputationGrid::new(13, 1.0);
        let potential = potential_from(&other, |x, _| x);
        let err = FieldDifferentiator::new(&grid, 3).unwrap().curl(&potential).unwrap_err();
        assert_eq!(err.stage(), Stage::Differentiation);
    }
}
