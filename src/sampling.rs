//! Centered, strided downsampling of the field for arrow plots.

use std::ops::Range;

use crate::config::{check_at_least, check_shape, ConfigError};
use crate::constants::SAMPLE_WINDOW_SHIFT;
use crate::errors::{Result, Stage};
use crate::fields::PlanarMagneticField;
use crate::grid::ComputationGrid;
use crate::math::{hypot_grid, Grid2, Scalar};

/// Indices picked along each axis: `start, start + skip, …` (`count` of them).
///
/// `start = (N − skip·count)/2 + 2` with integer division.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    start: usize,
    count: usize,
    step: usize,
}

impl SampleWindow {
    /// Window of `count` points with stride `step` centered on an axis of `size` points.
    pub fn centered(size: usize, count: usize, step: usize) -> Result<Self, ConfigError> {
        check_at_least("n_plot", count, 1)?;
        check_at_least("skip", step, 1)?;
        let span = step.saturating_mul(count);
        let slack = size
            .checked_sub(span)
            .ok_or(ConfigError::WindowExceedsGrid { size, span })?;
        Ok(Self { start: slack / 2 + SAMPLE_WINDOW_SHIFT, count, step })
    }

    /// First sampled index.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end of the slice, `start + step·(count − 1) + 1`.
    #[must_use]
    pub fn stop(&self) -> usize {
        self.last() + 1
    }

    /// Last sampled index.
    #[must_use]
    pub fn last(&self) -> usize {
        self.start + self.step * (self.count - 1)
    }

    /// Number of sampled points per axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when the window holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sampled indices in increasing order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.start..self.stop()).step_by(self.step)
    }

    /// Fails unless every sampled index lies in `interior`.
    pub fn check_within(&self, interior: &Range<usize>) -> Result<(), ConfigError> {
        if interior.contains(&self.start) && interior.contains(&self.last()) {
            Ok(())
        } else {
            Err(ConfigError::SampleWindowOutsideInterior {
                first: self.start,
                last: self.last(),
                interior_start: interior.start,
                interior_end: interior.end,
            })
        }
    }

    fn take(&self, source: &Grid2) -> Grid2 {
        let idx: Vec<usize> = self.indices().collect();
        Grid2::from_fn(self.count, self.count, |r, c| source[(idx[r], idx[c])])
    }
}

/// Downsampled field ready for a quiver plot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SampledField {
    /// Arrow tail x coordinates.
    pub x: Grid2,
    /// Arrow tail y coordinates.
    pub y: Grid2,
    /// Sampled `Bx`.
    pub bx: Grid2,
    /// Sampled `By`.
    pub by: Grid2,
    /// `max |B| · n_plot`; larger values draw shorter arrows.
    pub arrow_scale: Scalar,
}

impl SampledField {
    /// Points per axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// True when no points were sampled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `|B|` per sampled point.
    #[must_use]
    pub fn magnitude(&self) -> Grid2 {
        hypot_grid(&self.bx, &self.by)
    }

    /// `(x, y, bx, by)` per sampled point, row by row.
    pub fn points(&self) -> impl Iterator<Item = (Scalar, Scalar, Scalar, Scalar)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |r| {
            (0..n).map(move |c| {
                (self.x[(r, c)], self.y[(r, c)], self.bx[(r, c)], self.by[(r, c)])
            })
        })
    }
}

/// Picks the centered `n_plot × n_plot` arrow grid out of the fine field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    n_plot: usize,
    skip: usize,
}

impl Sampler {
    /// Sampler for `n_plot` points per axis taken every `skip` fine-grid points.
    #[must_use]
    pub fn new(n_plot: usize, skip: usize) -> Self {
        Self { n_plot, skip }
    }

    /// Downsamples `field` (defined on `grid`) and computes the arrow scale.
    pub fn sample(&self, grid: &ComputationGrid, field: &PlanarMagneticField) -> Result<SampledField> {
        let at = |e: ConfigError| e.at(Stage::Sampling);
        check_shape("B", grid.shape(), field.shape()).map_err(at)?;
        let window = SampleWindow::centered(grid.size(), self.n_plot, self.skip).map_err(at)?;
        window.check_within(&field.interior()).map_err(at)?;

        let bx = window.take(&field.bx);
        let by = window.take(&field.by);
        let peak = hypot_grid(&bx, &by).max();
        let arrow_scale = peak * self.n_plot as Scalar;
        log::debug!(
            "sampled {0}x{0} arrows from indices {1}..{2} step {3}, scale {4:.4e}",
            self.n_plot,
            window.start(),
            window.stop(),
            self.skip,
            arrow_scale
        );

        Ok(SampledField {
            x: window.take(grid.x()),
            y: window.take(grid.y()),
            bx,
            by,
            arrow_scale,
        })
    }
}
