use crate::grid::MagnetGrid;
use crate::math::{hypot_grid, Grid2, Scalar, R2};

/// Assigns a magnetization vector to each point of the magnet grid.
///
/// The strategy fixes both the magnet's shape (where the vector is nonzero)
/// and its orientation. Closures `Fn(x, y) -> R2` implement it directly.
pub trait MagnetizationStrategy {
    /// Magnetization at `(x, y)`.
    fn magnetization(&self, x: Scalar, y: Scalar) -> R2;
}

impl<F> MagnetizationStrategy for F
where
    F: Fn(Scalar, Scalar) -> R2,
{
    fn magnetization(&self, x: Scalar, y: Scalar) -> R2 {
        self(x, y)
    }
}

/// Rectangular bar magnet with uniform unit magnetization along `direction`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarMagnet {
    /// Half of the extent along x.
    pub half_width: Scalar,
    /// Half of the extent along y.
    pub half_length: Scalar,
    /// Magnetization inside the bar.
    pub direction: R2,
}

impl BarMagnet {
    /// Bar of size `width × length` magnetized along +y (the long axis).
    #[must_use]
    pub fn new(width: Scalar, length: Scalar) -> Self {
        Self {
            half_width: 0.5 * width,
            half_length: 0.5 * length,
            direction: R2::new(0.0, 1.0),
        }
    }

    /// Replaces the magnetization direction.
    #[must_use]
    pub fn with_direction(mut self, direction: R2) -> Self {
        self.direction = direction;
        self
    }

    /// True when `(x, y)` lies inside or on the bar's boundary.
    #[must_use]
    pub fn contains(&self, x: Scalar, y: Scalar) -> bool {
        y.abs() <= self.half_length && x.abs() <= self.half_width
    }
}

impl MagnetizationStrategy for BarMagnet {
    fn magnetization(&self, x: Scalar, y: Scalar) -> R2 {
        if self.contains(x, y) {
            self.direction
        } else {
            R2::zeros()
        }
    }
}

/// Same magnetization at every source point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformMagnetization(pub R2);

impl MagnetizationStrategy for UniformMagnetization {
    fn magnetization(&self, _x: Scalar, _y: Scalar) -> R2 {
        self.0
    }
}

/// No magnetization anywhere.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unmagnetized;

impl MagnetizationStrategy for Unmagnetized {
    fn magnetization(&self, _x: Scalar, _y: Scalar) -> R2 {
        R2::zeros()
    }
}

/// Magnetization components on the magnet grid; entry `(j, i)` belongs to `(X[i], Y[j])`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MagnetizationField {
    /// x components.
    pub mx: Grid2,
    /// y components.
    pub my: Grid2,
}

impl MagnetizationField {
    /// Evaluates `strategy` at every point of `grid`.
    #[must_use]
    pub fn from_strategy<S>(grid: &MagnetGrid, strategy: &S) -> Self
    where
        S: MagnetizationStrategy + ?Sized,
    {
        let (rows, cols) = grid.shape();
        let (xs, ys) = (grid.x_axis(), grid.y_axis());
        let mut mx = Grid2::zeros(rows, cols);
        let mut my = Grid2::zeros(rows, cols);
        for (j, &y) in ys.iter().enumerate() {
            for (i, &x) in xs.iter().enumerate() {
                let m = strategy.magnetization(x, y);
                mx[(j, i)] = m.x;
                my[(j, i)] = m.y;
            }
        }
        Self { mx, my }
    }

    /// `(rows, cols)` shape of both component arrays.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.mx.shape()
    }

    /// Magnitude `sqrt(Mx² + My²)` per cell.
    #[must_use]
    pub fn magnitude(&self) -> Grid2 {
        hypot_grid(&self.mx, &self.my)
    }

    /// True when every component is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mx.iter().chain(self.my.iter()).all(|&m| m == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_magnet_is_an_indicator_along_y() {
        let grid = MagnetGrid::new(0.5, 0.5, 30);
        let field = MagnetizationField::from_strategy(&grid, &BarMagnet::new(1.0, 1.0));
        assert!(field.mx.iter().all(|&m| m == 0.0));
        assert!(field.my.iter().all(|&m| m == 1.0));
        assert!(field.magnitude().iter().all(|&m| m == 0.0 || m == 1.0));
    }

    #[test]
    fn smaller_bar_leaves_outer_cells_empty() {
        let grid = MagnetGrid::new(1.0, 1.0, 5);
        let field = MagnetizationField::from_strategy(&grid, &BarMagnet::new(1.0, 1.0));
        // Axes are [-1, -0.5, 0, 0.5, 1]; only the central 3 × 3 block is inside.
        let inside = field.my.iter().filter(|&&m| m == 1.0).count();
        assert_eq!(inside, 9);
        assert_eq!(field.my[(0, 2)], 0.0);
        assert_eq!(field.my[(2, 2)], 1.0);
    }

    #[test]
    fn closures_act_as_strategies() {
        let grid = MagnetGrid::new(1.0, 1.0, 4);
        let swirl = |x: Scalar, y: Scalar| R2::new(-y, x);
        let field = MagnetizationField::from_strategy(&grid, &swirl);
        assert_eq!(field.mx[(0, 0)], 1.0);
        assert_eq!(field.my[(0, 3)], 1.0);
    }

    #[test]
    fn unmagnetized_is_zero() {
        let grid = MagnetGrid::new(1.0, 1.0, 4);
        let field = MagnetizationField::from_strategy(&grid, &Unmagnetized);
        assert!(field.is_zero());
        let field = MagnetizationField::from_strategy(&grid, &UniformMagnetization(R2::new(1.0, 0.0)));
        assert!(!field.is_zero());
    }
}
