//! Magnetization sources, vector potential quadrature and curl extraction.

mod curl;
mod magnetization;
mod potential;

pub use curl::{FieldDifferentiator, PlanarMagneticField};
pub use magnetization::{
    BarMagnet, MagnetizationField, MagnetizationStrategy, UniformMagnetization, Unmagnetized,
};
pub use potential::{planar_kernel, ClipBounds, PotentialIntegrator, VectorPotential};
