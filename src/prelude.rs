//! Convenience re-exports for computing and rendering magnet fields.

pub use crate::config::{ConfigError, MagnetConfig};
pub use crate::constants::*;
pub use crate::errors::{Magnet2dError, Stage};
pub use crate::fields::{
    planar_kernel, BarMagnet, ClipBounds, FieldDifferentiator, MagnetizationField,
    MagnetizationStrategy, PlanarMagneticField, PotentialIntegrator, UniformMagnetization,
    Unmagnetized, VectorPotential,
};
pub use crate::grid::{ComputationGrid, GridBuilder, Grids, MagnetGrid};
pub use crate::math::{linspace, trapezoid_weights, Grid2, Scalar, R2};
pub use crate::sampling::{SampleWindow, SampledField, Sampler};
pub use crate::simulation::{FieldSolution, MagnetSimulation, Renderer};
