//! Shared error types used across submodules.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;

/// Pipeline stage at which a failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Up-front validation of a [`MagnetConfig`](crate::config::MagnetConfig).
    Configuration,
    /// Fine and magnet grid construction.
    GridBuilder,
    /// Magnetization assignment on the magnet grid.
    Magnetization,
    /// Vector potential quadrature.
    Integration,
    /// Curl extraction from the potential.
    Differentiation,
    /// Display downsampling.
    Sampling,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::GridBuilder => "grid builder",
            Self::Magnetization => "magnetization model",
            Self::Integration => "potential integrator",
            Self::Differentiation => "field differentiator",
            Self::Sampling => "sampler",
        };
        f.write_str(name)
    }
}

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Magnet2dError {
    /// Raised when sizing or shapes cannot support a stage's index arithmetic.
    #[error("invalid configuration in {stage}: {source}")]
    Config {
        /// Stage that rejected the input.
        stage: Stage,
        /// Offending parameter and value.
        #[source]
        source: ConfigError,
    },
}

impl Magnet2dError {
    /// Stage that produced the error.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Config { stage, .. } => *stage,
        }
    }
}

impl ConfigError {
    /// Attributes this error to `stage`.
    #[must_use]
    pub fn at(self, stage: Stage) -> Magnet2dError {
        Magnet2dError::Config { stage, source: self }
    }
}

/// Convenience alias for results carrying [`Magnet2dError`].
pub type Result<T, E = Magnet2dError> = std::result::Result<T, E>;
