//! Vector potential of a magnetized region by direct planar quadrature.
//!
//! Each source cell at `(X, Y)` with magnetization `M` contributes
//!
//! ```text
//! dAz = (1/2π) · (Mx·(y − Y) − My·(x − X)) / r²,   r² = (x − X)² + (y − Y)²
//! ```
//!
//! and `Az` is the trapezoidal double integral of `dAz` over the magnet grid,
//! first along Y and then along X. To keep the potential finite where the
//! evaluation and source grids coincide, `r²` is clipped into
//! `[2·dR², 10·rR²max]` ([`ClipBounds`]).
//!
//! The integrand is never stored: trapezoidal weights are precomputed per
//! axis and every evaluation point reduces over the source cells directly,
//! so memory stays at O(N² + n²) instead of O(n²·N²).

use crate::config::{check_at_least, check_positive, check_shape};
use crate::constants::{CLIP_CEILING_FACTOR, CLIP_FLOOR_FACTOR, KERNEL_PREFACTOR};
use crate::errors::{Result, Stage};
use crate::grid::{ComputationGrid, MagnetGrid};
use crate::math::{trapezoid_weights, Grid2, Scalar, R2};

use super::magnetization::MagnetizationField;

/// Closed interval into which squared source distances are clipped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    floor: Scalar,
    ceiling: Scalar,
}

impl ClipBounds {
    /// Bounds for integrating over `magnet` while evaluating on `field`.
    ///
    /// The floor is twice the squared diagonal spacing of the magnet grid; the
    /// ceiling is ten times the squared diagonal of the combined domain.
    #[must_use]
    pub fn from_grids(field: &ComputationGrid, magnet: &MagnetGrid) -> Self {
        let field_span = 2.0 * field.extent();
        let (magnet_dx, magnet_dy) = magnet.span();
        let r2_max = (field_span + magnet_dx).powi(2) + (field_span + magnet_dy).powi(2);
        let floor = CLIP_FLOOR_FACTOR * magnet.diagonal_spacing_squared();
        let ceiling = CLIP_CEILING_FACTOR * r2_max;
        Self { floor, ceiling: ceiling.max(floor) }
    }

    /// Smallest squared distance the kernel sees.
    #[must_use]
    pub fn floor(&self) -> Scalar {
        self.floor
    }

    /// Largest squared distance the kernel sees.
    #[must_use]
    pub fn ceiling(&self) -> Scalar {
        self.ceiling
    }

    /// Clamps `r2` into `[floor, ceiling]`; NaN maps to the floor.
    #[inline]
    #[must_use]
    pub fn clip(&self, r2: Scalar) -> Scalar {
        r2.max(self.floor).min(self.ceiling)
    }
}

/// Kernel value for magnetization `m` at offset `(dx, dy) = (x − X, y − Y)`
/// and an already clipped squared distance `r2`.
#[inline]
#[must_use]
pub fn planar_kernel(m: R2, dx: Scalar, dy: Scalar, r2: Scalar) -> Scalar {
    KERNEL_PREFACTOR * (m.x * dy - m.y * dx) / r2
}

/// Scalar vector potential `Az` sampled on the fine grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPotential {
    /// `Az` at every fine-grid point.
    pub az: Grid2,
}

impl VectorPotential {
    /// `(rows, cols)` shape.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.az.shape()
    }

    /// Smallest value, useful for contour levels.
    #[must_use]
    pub fn min(&self) -> Scalar {
        self.az.min()
    }

    /// Largest value.
    #[must_use]
    pub fn max(&self) -> Scalar {
        self.az.max()
    }

    /// `count` evenly spaced contour levels spanning `[min, max]`.
    #[must_use]
    pub fn contour_levels(&self, count: usize) -> Vec<Scalar> {
        crate::math::linspace(self.min(), self.max(), count)
    }
}

struct SourceCell {
    y: Scalar,
    weight: Scalar,
    m: R2,
}

struct SourceColumn {
    x: Scalar,
    weight: Scalar,
    cells: Vec<SourceCell>,
}

/// Integrates the planar kernel over a magnet grid for every fine-grid point.
#[derive(Debug, Clone, Copy)]
pub struct PotentialIntegrator<'a> {
    field: &'a ComputationGrid,
    magnet: &'a MagnetGrid,
    bounds: ClipBounds,
}

impl<'a> PotentialIntegrator<'a> {
    /// Integrator evaluating on `field` with sources on `magnet`.
    ///
    /// The magnet grid needs at least two points per axis and a non-zero extent,
    /// otherwise the clip floor vanishes and coincident points divide by zero.
    pub fn new(field: &'a ComputationGrid, magnet: &'a MagnetGrid) -> Result<Self> {
        let at = |e: crate::config::ConfigError| e.at(Stage::Integration);
        check_at_least("magnet_resolution", magnet.resolution(), 2).map_err(at)?;
        let bounds = ClipBounds::from_grids(field, magnet);
        check_positive("clip floor", bounds.floor).map_err(at)?;
        Ok(Self { field, magnet, bounds })
    }

    /// Distance clipping applied to every source/evaluation pair.
    #[must_use]
    pub fn bounds(&self) -> ClipBounds {
        self.bounds
    }

    /// Computes `Az` for `magnetization`, which must be defined on the magnet grid.
    pub fn integrate(&self, magnetization: &MagnetizationField) -> Result<VectorPotential> {
        check_shape("magnetization", self.magnet.shape(), magnetization.shape())
            .map_err(|e| e.at(Stage::Integration))?;

        let columns = self.source_columns(magnetization);
        let active: usize = columns.iter().map(|c| c.cells.len()).sum();
        let n = self.field.size();
        log::debug!(
            "integrating Az on {n}x{n} points over {active} magnetized cells (clip [{:.3e}, {:.3e}])",
            self.bounds.floor,
            self.bounds.ceiling
        );

        let (xs, ys) = (self.field.x_axis(), self.field.y_axis());
        let az = Grid2::from_fn(n, n, |r, c| self.potential_at(xs[c], ys[r], &columns));
        Ok(VectorPotential { az })
    }

    fn source_columns(&self, magnetization: &MagnetizationField) -> Vec<SourceColumn> {
        let (xs, ys) = (self.magnet.x_axis(), self.magnet.y_axis());
        let wx = trapezoid_weights(xs);
        let wy = trapezoid_weights(ys);
        xs.iter()
            .zip(&wx)
            .enumerate()
            .map(|(i, (&x, &weight))| {
                let cells = ys
                    .iter()
                    .zip(&wy)
                    .enumerate()
                    .map(|(j, (&y, &y_weight))| SourceCell {
                        y,
                        weight: y_weight,
                        m: R2::new(magnetization.mx[(j, i)], magnetization.my[(j, i)]),
                    })
                    .filter(|cell| cell.m != R2::zeros())
                    .collect();
                SourceColumn { x, weight, cells }
            })
            .filter(|column: &SourceColumn| !column.cells.is_empty())
            .collect()
    }

    fn potential_at(&self, x: Scalar, y: Scalar, columns: &[SourceColumn]) -> Scalar {
        columns
            .iter()
            .map(|column| {
                let dx = x - column.x;
                let inner: Scalar = column
                    .cells
                    .iter()
                    .map(|cell| {
                        let dy = y - cell.y;
                        let r2 = self.bounds.clip(dx * dx + dy * dy);
                        cell.weight * planar_kernel(cell.m, dx, dy, r2)
                    })
                    .sum();
                column.weight * inner
            })
            .sum()
    }
}
