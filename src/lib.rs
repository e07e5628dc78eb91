#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Numerical constants of the kernel, clipping and stencils.
pub mod constants;
/// Shared mathematical utilities (array aliases, quadrature weights, medians).
pub mod math;
/// Run configuration and sizing validation.
pub mod config;
/// Fine evaluation grid and coarse magnet grid.
pub mod grid;
/// Magnetization sources, vector potential and field extraction.
pub mod fields;
/// Display downsampling of the field.
pub mod sampling;
/// End-to-end pipeline and the renderer seam.
pub mod simulation;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
