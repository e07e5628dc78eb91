//! Run configuration: magnet dimensions and grid sizing parameters.

use std::ops::Range;

use crate::constants::MIN_SMOOTH;
use crate::math::Scalar;
use crate::sampling::SampleWindow;

/// Errors raised when sizing parameters cannot support the pipeline's index arithmetic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A physical dimension is zero, negative, or not finite.
    #[error("`{parameter}` must be positive and finite, got {value}")]
    NonPositive {
        /// Parameter name.
        parameter: &'static str,
        /// Rejected value.
        value: Scalar,
    },
    /// An integer parameter is below its minimum.
    #[error("`{parameter}` must be at least {min}, got {value}")]
    TooSmall {
        /// Parameter name.
        parameter: &'static str,
        /// Rejected value.
        value: usize,
        /// Smallest accepted value.
        min: usize,
    },
    /// `skip · (n_plot + 2)` overflowed.
    #[error("fine grid size overflows for skip = {skip}, n_plot = {n_plot}")]
    FineGridOverflow {
        /// Display stride.
        skip: usize,
        /// Displayed points per axis.
        n_plot: usize,
    },
    /// The fine grid cannot hold the differentiation margin on both sides.
    #[error("fine grid size {size} is too small for smooth = {smooth} (needs at least {min})")]
    FineGridTooSmall {
        /// Fine grid points per axis.
        size: usize,
        /// Smoothing radius.
        smooth: usize,
        /// Smallest accepted fine grid size.
        min: usize,
    },
    /// The centered display window reaches into the undifferentiated margin.
    #[error(
        "sample window [{first}, {last}] leaves the differentiated interior [{interior_start}, {interior_end})"
    )]
    SampleWindowOutsideInterior {
        /// First sampled index.
        first: usize,
        /// Last sampled index.
        last: usize,
        /// First valid interior index.
        interior_start: usize,
        /// One past the last valid interior index.
        interior_end: usize,
    },
    /// The display window is wider than the fine grid.
    #[error("display window spans {span} points but the fine grid has only {size}")]
    WindowExceedsGrid {
        /// Fine grid points per axis.
        size: usize,
        /// `skip · n_plot`.
        span: usize,
    },
    /// An array handed to a stage has the wrong shape.
    #[error("`{what}` has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Name of the offending array.
        what: &'static str,
        /// Shape required by the stage.
        expected: (usize, usize),
        /// Shape received.
        found: (usize, usize),
    },
}

/// Scalar parameters of one pipeline run.
///
/// Defaults reproduce a unit square magnet shown on a 16 × 16 arrow grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MagnetConfig {
    /// Magnet length `L` along y.
    pub length: Scalar,
    /// Magnet width `W` along x.
    pub width: Scalar,
    /// Displayed field-vector points per axis (`Nplt`).
    pub n_plot: usize,
    /// Display downsampling stride.
    pub skip: usize,
    /// Derivative offsets combined by the median, plus two.
    pub smooth: usize,
    /// Magnet (source) grid points per axis (`n`).
    pub magnet_resolution: usize,
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            length: 1.0,
            width: 1.0,
            n_plot: 16,
            skip: 5,
            smooth: 4,
            magnet_resolution: 30,
        }
    }
}

impl MagnetConfig {
    /// Creates a configuration for an `length × width` magnet with default grid sizing.
    #[must_use]
    pub fn new(length: Scalar, width: Scalar) -> Self {
        Self { length, width, ..Self::default() }
    }

    /// Sets the displayed points per axis.
    #[must_use]
    pub fn with_plot_points(mut self, n_plot: usize) -> Self {
        self.n_plot = n_plot;
        self
    }

    /// Sets the display stride.
    #[must_use]
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the smoothing radius of the differentiator.
    #[must_use]
    pub fn with_smooth(mut self, smooth: usize) -> Self {
        self.smooth = smooth;
        self
    }

    /// Sets the magnet grid resolution.
    #[must_use]
    pub fn with_magnet_resolution(mut self, n: usize) -> Self {
        self.magnet_resolution = n;
        self
    }

    /// Half of the magnet width (`W/2`).
    #[must_use]
    pub fn half_width(&self) -> Scalar {
        0.5 * self.width
    }

    /// Half of the magnet length (`L/2`).
    #[must_use]
    pub fn half_length(&self) -> Scalar {
        0.5 * self.length
    }

    /// Fine grid points per axis, `N = skip · (n_plot + 2)`.
    ///
    /// Saturates on overflow; [`validate`](Self::validate) rejects such sizes.
    #[must_use]
    pub fn fine_size(&self) -> usize {
        self.n_plot.saturating_add(2).saturating_mul(self.skip)
    }

    /// Half-extent of the fine grid, `(N + 2·smooth) / (N − 1)`.
    #[must_use]
    pub fn fine_extent(&self) -> Scalar {
        let n = self.fine_size() as Scalar;
        (n + 2.0 * self.smooth as Scalar) / (n - 1.0)
    }

    /// Index range on which the differentiator defines the field.
    #[must_use]
    pub fn interior(&self) -> Range<usize> {
        self.smooth..self.fine_size().saturating_sub(self.smooth)
    }

    /// Centered display window on the fine grid.
    pub fn sample_window(&self) -> Result<SampleWindow, ConfigError> {
        SampleWindow::centered(self.fine_size(), self.n_plot, self.skip)
    }

    /// Corners of the magnet's bounding rectangle, counter-clockwise from bottom-left.
    #[must_use]
    pub fn outline(&self) -> [(Scalar, Scalar); 4] {
        let (hw, hl) = (self.half_width(), self.half_length());
        [(-hw, -hl), (hw, -hl), (hw, hl), (-hw, hl)]
    }

    /// Checks every sizing relation the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("length", self.length)?;
        check_positive("width", self.width)?;
        check_at_least("n_plot", self.n_plot, 1)?;
        check_at_least("skip", self.skip, 1)?;
        check_at_least("smooth", self.smooth, MIN_SMOOTH)?;
        check_at_least("magnet_resolution", self.magnet_resolution, 2)?;

        let size = checked_fine_size(self.n_plot, self.skip)?;
        check_fine_size(size, self.smooth)?;

        self.sample_window()?.check_within(&self.interior())
    }
}

pub(crate) fn check_positive(parameter: &'static str, value: Scalar) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { parameter, value })
    }
}

pub(crate) fn check_at_least(parameter: &'static str, value: usize, min: usize) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::TooSmall { parameter, value, min })
    }
}

pub(crate) fn checked_fine_size(n_plot: usize, skip: usize) -> Result<usize, ConfigError> {
    n_plot
        .checked_add(2)
        .and_then(|n| n.checked_mul(skip))
        .ok_or(ConfigError::FineGridOverflow { skip, n_plot })
}

pub(crate) fn check_fine_size(size: usize, smooth: usize) -> Result<(), ConfigError> {
    let min = 2 * smooth + 2;
    if size >= min {
        Ok(())
    } else {
        Err(ConfigError::FineGridTooSmall { size, smooth, min })
    }
}

pub(crate) fn check_shape(
    what: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<(), ConfigError> {
    if expected == found {
        Ok(())
    } else {
        Err(ConfigError::ShapeMismatch { what, expected, found })
    }
}
