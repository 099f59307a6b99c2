//! Obstacle boundary handling shared by the stencil kernels
//!
//! The divergence, Jacobi, and gradient-subtraction kernels all read the
//! four axis neighbors of a cell. At a solid neighbor they must substitute
//! the center cell's own value instead of the neighbor's stored value (the
//! zero-flux mirror that keeps solid walls from absorbing or creating
//! divergence). That substitution rule and the mask convention live here and
//! nowhere else.
//!
//! Mask convention: a mask sample at or above [`MASK_THRESHOLD`] is active,
//! meaning solid for the obstacle mask and emitting for the impulse mask.
//! A freshly allocated all-zero mask is therefore all fluid and all quiet.
//! Cells outside the grid count as solid, which closes the domain with the
//! same mirror rule used for interior obstacles.

use crate::fields::Vec2;

/// Mask activity threshold; samples at or above it are active
pub const MASK_THRESHOLD: f32 = 0.5;

/// One kernel dispatch's view of the obstacle mask
///
/// Bundles the mask slice with the grid dimensions so stencil lookups stay
/// a single call at each neighbor.
#[derive(Clone, Copy)]
pub struct Boundary<'a> {
    obstacles: &'a [f32],
    width: usize,
    height: usize,
}

impl<'a> Boundary<'a> {
    #[must_use]
    pub fn new(obstacles: &'a [f32], width: usize, height: usize) -> Self {
        Self {
            obstacles,
            width,
            height,
        }
    }

    /// Whether the cell itself is solid
    #[inline]
    #[must_use]
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.obstacles[y * self.width + x] >= MASK_THRESHOLD
    }

    /// Index of the neighbor at offset (`dx`, `dy`), or `None` when that
    /// neighbor is solid or outside the grid
    #[inline]
    fn fluid_neighbor(&self, x: usize, y: usize, dx: i32, dy: i32) -> Option<usize> {
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
            return None;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if self.is_solid(nx, ny) {
            None
        } else {
            Some(ny * self.width + nx)
        }
    }

    /// Neighbor sample from a scalar field, mirroring the center value at
    /// solid or off-grid neighbors
    #[inline]
    #[must_use]
    pub fn mirrored_scalar(&self, field: &[f32], x: usize, y: usize, dx: i32, dy: i32) -> f32 {
        match self.fluid_neighbor(x, y, dx, dy) {
            Some(neighbor) => field[neighbor],
            None => field[y * self.width + x],
        }
    }

    /// Neighbor sample from a vector field, mirroring the center value at
    /// solid or off-grid neighbors
    #[inline]
    #[must_use]
    pub fn mirrored_velocity(&self, field: &[Vec2], x: usize, y: usize, dx: i32, dy: i32) -> Vec2 {
        match self.fluid_neighbor(x, y, dx, dy) {
            Some(neighbor) => field[neighbor],
            None => field[y * self.width + x],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_three_with_solid_center() -> Vec<f32> {
        let mut obstacles = vec![0.0; 9];
        obstacles[4] = 1.0; // Cell (1, 1)
        obstacles
    }

    #[test]
    fn test_fluid_neighbor_returns_stored_value() {
        let obstacles = vec![0.0; 9];
        let boundary = Boundary::new(&obstacles, 3, 3);
        let field = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        assert_eq!(boundary.mirrored_scalar(&field, 1, 1, 1, 0), 5.0);
        assert_eq!(boundary.mirrored_scalar(&field, 1, 1, 0, 1), 7.0);
    }

    #[test]
    fn test_solid_neighbor_mirrors_center() {
        let obstacles = three_by_three_with_solid_center();
        let boundary = Boundary::new(&obstacles, 3, 3);
        let field = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        // (0, 1) looks right into the solid center and sees itself
        assert_eq!(boundary.mirrored_scalar(&field, 0, 1, 1, 0), 3.0);
        // (1, 0) looks up into the solid center and sees itself
        assert_eq!(boundary.mirrored_scalar(&field, 1, 0, 0, 1), 1.0);
    }

    #[test]
    fn test_off_grid_neighbor_mirrors_center() {
        let obstacles = vec![0.0; 9];
        let boundary = Boundary::new(&obstacles, 3, 3);
        let field = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        assert_eq!(boundary.mirrored_scalar(&field, 0, 0, -1, 0), 0.0);
        assert_eq!(boundary.mirrored_scalar(&field, 2, 2, 0, 1), 8.0);
    }

    #[test]
    fn test_mirrored_velocity_matches_scalar_rule() {
        let obstacles = three_by_three_with_solid_center();
        let boundary = Boundary::new(&obstacles, 3, 3);
        let mut field = vec![Vec2::zeros(); 9];
        field[3] = Vec2::new(-2.0, 0.5); // Cell (0, 1)
        field[4] = Vec2::new(9.0, 9.0); // Solid center, never read through mirror

        assert_eq!(
            boundary.mirrored_velocity(&field, 0, 1, 1, 0),
            Vec2::new(-2.0, 0.5)
        );
    }

    #[test]
    fn test_threshold_is_half() {
        let obstacles = vec![0.49, 0.5];
        let boundary = Boundary::new(&obstacles, 2, 1);
        assert!(!boundary.is_solid(0, 0));
        assert!(boundary.is_solid(1, 0));
    }
}
