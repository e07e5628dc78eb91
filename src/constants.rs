//! Numerical constants shared by the quadrature and differentiation stages.
//!
//! The model is dimensionless: lengths are in units of the padded half-extent
//! of the field grid and magnetization is normalized to 1 inside the magnet.

use std::f64::consts::PI;

/// Prefactor of the planar kernel, 1/(2π).
pub const KERNEL_PREFACTOR: f64 = 0.5 / PI;

/// Lower clip of r² in units of the squared coarse-grid diagonal spacing.
pub const CLIP_FLOOR_FACTOR: f64 = 2.0;

/// Upper clip of r² in units of the squared diagonal extent of the combined domain.
pub const CLIP_CEILING_FACTOR: f64 = 10.0;

/// Smallest smoothing radius that still yields one derivative offset (k = 2).
pub const MIN_SMOOTH: usize = 3;

/// First derivative offset used by the median-filtered stencil.
pub const FIRST_STENCIL_OFFSET: usize = 2;

/// Extra index shift applied to the centered sample window.
pub const SAMPLE_WINDOW_SHIFT: usize = 2;
