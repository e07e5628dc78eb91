//! Fine evaluation grid and coarse magnet grid construction.

use crate::config::{check_at_least, check_fine_size, check_positive, checked_fine_size, MagnetConfig};
use crate::errors::{Result, Stage};
use crate::math::{linspace, Grid2, Scalar};

/// Square N × N evaluation grid spanning `[-extent, extent]²`.
///
/// `x[(r, c)] = x_axis[c]` and `y[(r, c)] = y_axis[r]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationGrid {
    axis: Vec<Scalar>,
    x: Grid2,
    y: Grid2,
    extent: Scalar,
}

impl ComputationGrid {
    /// Builds a `size × size` grid over `[-extent, extent]` in both axes.
    #[must_use]
    pub fn new(size: usize, extent: Scalar) -> Self {
        let axis = linspace(-extent, extent, size);
        let x = Grid2::from_fn(size, size, |_, c| axis[c]);
        let y = Grid2::from_fn(size, size, |r, _| axis[r]);
        Self { axis, x, y, extent }
    }

    /// Points per axis (N).
    #[must_use]
    pub fn size(&self) -> usize {
        self.axis.len()
    }

    /// Half-extent of the grid.
    #[must_use]
    pub fn extent(&self) -> Scalar {
        self.extent
    }

    /// Spacing between neighbouring points, identical in x and y.
    #[must_use]
    pub fn spacing(&self) -> Scalar {
        match self.size() {
            0 | 1 => 0.0,
            n => 2.0 * self.extent / (n as Scalar - 1.0),
        }
    }

    /// x coordinate of every grid point.
    #[must_use]
    pub fn x(&self) -> &Grid2 {
        &self.x
    }

    /// y coordinate of every grid point.
    #[must_use]
    pub fn y(&self) -> &Grid2 {
        &self.y
    }

    /// Column abscissae.
    #[must_use]
    pub fn x_axis(&self) -> &[Scalar] {
        &self.axis
    }

    /// Row ordinates.
    #[must_use]
    pub fn y_axis(&self) -> &[Scalar] {
        &self.axis
    }

    /// `(rows, cols)` shape of every array defined on this grid.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.size(), self.size())
    }
}

/// Coarse source grid covering exactly the magnet's bounding box.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MagnetGrid {
    x_axis: Vec<Scalar>,
    y_axis: Vec<Scalar>,
}

impl MagnetGrid {
    /// Builds an `n × n` grid over `[-half_width, half_width] × [-half_length, half_length]`.
    #[must_use]
    pub fn new(half_width: Scalar, half_length: Scalar, n: usize) -> Self {
        Self {
            x_axis: linspace(-half_width, half_width, n),
            y_axis: linspace(-half_length, half_length, n),
        }
    }

    /// Points per axis (n).
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.x_axis.len()
    }

    /// Source abscissae `X`.
    #[must_use]
    pub fn x_axis(&self) -> &[Scalar] {
        &self.x_axis
    }

    /// Source ordinates `Y`.
    #[must_use]
    pub fn y_axis(&self) -> &[Scalar] {
        &self.y_axis
    }

    /// `(dX, dY)` spacing of the source grid.
    #[must_use]
    pub fn spacing(&self) -> (Scalar, Scalar) {
        (axis_spacing(&self.x_axis), axis_spacing(&self.y_axis))
    }

    /// Squared diagonal cell spacing, `dX² + dY²`.
    #[must_use]
    pub fn diagonal_spacing_squared(&self) -> Scalar {
        let (dx, dy) = self.spacing();
        dx * dx + dy * dy
    }

    /// `(X_max − X_min, Y_max − Y_min)`.
    #[must_use]
    pub fn span(&self) -> (Scalar, Scalar) {
        (axis_span(&self.x_axis), axis_span(&self.y_axis))
    }

    /// `(XX, YY)` coordinate matrices, row `j` and column `i` holding `(X[i], Y[j])`.
    #[must_use]
    pub fn meshgrid(&self) -> (Grid2, Grid2) {
        let n = self.resolution();
        let xx = Grid2::from_fn(n, n, |_, i| self.x_axis[i]);
        let yy = Grid2::from_fn(n, n, |j, _| self.y_axis[j]);
        (xx, yy)
    }

    /// `(rows, cols)` shape of per-cell arrays.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.y_axis.len(), self.x_axis.len())
    }
}

fn axis_span(axis: &[Scalar]) -> Scalar {
    match (axis.first(), axis.last()) {
        (Some(lo), Some(hi)) => hi - lo,
        _ => 0.0,
    }
}

fn axis_spacing(axis: &[Scalar]) -> Scalar {
    if axis.len() < 2 {
        0.0
    } else {
        axis_span(axis) / (axis.len() as Scalar - 1.0)
    }
}

/// Both grids of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Grids {
    /// Padded evaluation grid.
    pub field: ComputationGrid,
    /// Magnet source grid.
    pub magnet: MagnetGrid,
}

/// Derives grid sizes from the display parameters and builds both grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBuilder {
    half_width: Scalar,
    half_length: Scalar,
    n_plot: usize,
    skip: usize,
    smooth: usize,
    magnet_resolution: usize,
}

impl GridBuilder {
    /// Takes the magnet half-dimensions and sizing parameters from `config`.
    #[must_use]
    pub fn from_config(config: &MagnetConfig) -> Self {
        Self {
            half_width: config.half_width(),
            half_length: config.half_length(),
            n_plot: config.n_plot,
            skip: config.skip,
            smooth: config.smooth,
            magnet_resolution: config.magnet_resolution,
        }
    }

    /// Fine grid points per axis, `skip · (n_plot + 2)`.
    #[must_use]
    pub fn fine_size(&self) -> usize {
        self.skip.saturating_mul(self.n_plot.saturating_add(2))
    }

    /// Padding factor `(N + 2·smooth) / (N − 1)` applied to the unit square.
    #[must_use]
    pub fn scale(&self) -> Scalar {
        let n = self.fine_size() as Scalar;
        (n + 2.0 * self.smooth as Scalar) / (n - 1.0)
    }

    /// Builds the fine and magnet grids, rejecting sizes the later stages cannot index.
    pub fn build(&self) -> Result<Grids> {
        let at = |e: crate::config::ConfigError| e.at(Stage::GridBuilder);
        check_positive("width", 2.0 * self.half_width).map_err(at)?;
        check_positive("length", 2.0 * self.half_length).map_err(at)?;
        check_at_least("n_plot", self.n_plot, 1).map_err(at)?;
        check_at_least("skip", self.skip, 1).map_err(at)?;
        check_at_least("magnet_resolution", self.magnet_resolution, 2).map_err(at)?;
        let size = checked_fine_size(self.n_plot, self.skip).map_err(at)?;
        check_fine_size(size, self.smooth).map_err(at)?;

        let scale = self.scale();
        log::trace!(
            "grid builder: N = {size}, scale = {scale:.6}, n = {}",
            self.magnet_resolution
        );

        Ok(Grids {
            field: ComputationGrid::new(size, scale),
            magnet: MagnetGrid::new(self.half_width, self.half_length, self.magnet_resolution),
        })
    }
}
