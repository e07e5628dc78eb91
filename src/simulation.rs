//! High-level orchestration: one validated configuration in, one immutable solution out.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::MagnetConfig;
use crate::errors::{Result, Stage};
use crate::fields::{
    BarMagnet, FieldDifferentiator, MagnetizationField, MagnetizationStrategy, PlanarMagneticField,
    PotentialIntegrator, VectorPotential,
};
use crate::grid::{ComputationGrid, GridBuilder, Grids, MagnetGrid};
use crate::math::{Grid2, Scalar};
use crate::sampling::{SampledField, Sampler};

/// Consumer of a finished run (plots, exporters, GUIs).
///
/// The crate computes arrays only; colour maps, file naming and image export
/// belong to implementations of this trait.
pub trait Renderer {
    /// Error reported by the renderer.
    type Error;

    /// Presents `solution`.
    fn render(&mut self, solution: &FieldSolution) -> std::result::Result<(), Self::Error>;
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct FieldSolution {
    config: MagnetConfig,
    grids: Grids,
    magnetization: MagnetizationField,
    potential: VectorPotential,
    field: PlanarMagneticField,
    sampled: SampledField,
    elapsed: Duration,
}

impl FieldSolution {
    /// Configuration the run used.
    #[must_use]
    pub fn config(&self) -> &MagnetConfig {
        &self.config
    }

    /// Fine evaluation grid `(x, y)`.
    #[must_use]
    pub fn field_grid(&self) -> &ComputationGrid {
        &self.grids.field
    }

    /// Magnet source grid.
    #[must_use]
    pub fn magnet_grid(&self) -> &MagnetGrid {
        &self.grids.magnet
    }

    /// `(XX, YY)` coordinate matrices of the magnet grid.
    #[must_use]
    pub fn magnet_mesh(&self) -> (Grid2, Grid2) {
        self.grids.magnet.meshgrid()
    }

    /// Magnetization components per magnet cell.
    #[must_use]
    pub fn magnetization(&self) -> &MagnetizationField {
        &self.magnetization
    }

    /// Magnetization magnitude `M` per magnet cell.
    #[must_use]
    pub fn magnetization_magnitude(&self) -> Grid2 {
        self.magnetization.magnitude()
    }

    /// Vector potential `Az` on the fine grid.
    #[must_use]
    pub fn potential(&self) -> &VectorPotential {
        &self.potential
    }

    /// Field on the fine grid; only the interior is defined.
    #[must_use]
    pub fn field(&self) -> &PlanarMagneticField {
        &self.field
    }

    /// Downsampled arrows.
    #[must_use]
    pub fn sampled(&self) -> &SampledField {
        &self.sampled
    }

    /// Arrow normalization for quiver plots.
    #[must_use]
    pub fn arrow_scale(&self) -> Scalar {
        self.sampled.arrow_scale
    }

    /// Corners of the magnet rectangle for drawing its outline.
    #[must_use]
    pub fn magnet_outline(&self) -> [(Scalar, Scalar); 4] {
        self.config.outline()
    }

    /// Wall-clock time of the run.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Hands this solution to `renderer`.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> std::result::Result<(), R::Error> {
        renderer.render(self)
    }
}

type Strategy = Box<dyn MagnetizationStrategy + Send + Sync>;

/// Pipeline runner: grids → magnetization → `Az` → `B` → arrows.
pub struct MagnetSimulation {
    config: MagnetConfig,
    strategy: Strategy,
}

impl fmt::Debug for MagnetSimulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagnetSimulation")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MagnetSimulation {
    /// Validates `config` and prepares a bar magnet of the configured size, magnetized along +y.
    pub fn new(config: MagnetConfig) -> Result<Self> {
        config.validate().map_err(|e| e.at(Stage::Configuration))?;
        let strategy = Box::new(BarMagnet::new(config.width, config.length));
        Ok(Self { config, strategy })
    }

    /// Replaces the magnetization strategy; grids and sizing are unchanged.
    #[must_use]
    pub fn with_strategy<S>(mut self, strategy: S) -> Self
    where
        S: MagnetizationStrategy + Send + Sync + 'static,
    {
        self.strategy = Box::new(strategy);
        self
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &MagnetConfig {
        &self.config
    }

    /// Runs every stage in order.
    pub fn run(&self) -> Result<FieldSolution> {
        let started = Instant::now();

        let grids = GridBuilder::from_config(&self.config).build()?;
        let magnetization = MagnetizationField::from_strategy(&grids.magnet, self.strategy.as_ref());
        if magnetization.is_zero() {
            log::warn!("magnetization is zero everywhere; field will vanish");
        }

        let potential = PotentialIntegrator::new(&grids.field, &grids.magnet)?.integrate(&magnetization)?;
        let field = FieldDifferentiator::new(&grids.field, self.config.smooth)?.curl(&potential)?;
        let sampled = Sampler::new(self.config.n_plot, self.config.skip).sample(&grids.field, &field)?;

        let elapsed = started.elapsed();
        log::info!(
            "solved {0}x{0} field grid from {1}x{1} magnet grid in {2:.3?} (arrow scale {3:.4e})",
            grids.field.size(),
            grids.magnet.resolution(),
            elapsed,
            sampled.arrow_scale
        );

        Ok(FieldSolution {
            config: self.config.clone(),
            grids,
            magnetization,
            potential,
            field,
            sampled,
            elapsed,
        })
    }
}
