//! Grid field storage for the smoke solver
//!
//! This module defines the storage units every kernel reads and writes:
//! scalar and 2-vector sample grids, plus the current/scratch pair used for
//! ping-pong updates. All grids store samples in row-major order
//! (`y * width + x`) with the y axis pointing up (row 0 is the bottom of the
//! domain).

use crate::error::ResourceError;
use nalgebra::Vector2;

/// 2D vector sample type used for velocity and normalized positions.
pub type Vec2 = Vector2<f32>;

/// Scalar field container
///
/// Stores one `f32` sample per grid cell as a flat `Vec<f32>` in row-major
/// order. Each field represents a continuous property across the simulation
/// grid (temperature, density, pressure, divergence, or a mask).
#[derive(Debug, Clone)]
pub struct ScalarField {
    /// Sample values in row-major order (`y * width + x`)
    pub data: Vec<f32>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl ScalarField {
    /// Create a new field with given dimensions, initialized to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Create a new zeroed field, reporting allocation failure instead of
    /// aborting
    ///
    /// Used by the resource manager so an oversized grid request surfaces as
    /// an error the caller can react to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AllocationFailed`] if the cell count
    /// overflows `usize` or the backing `Vec` cannot reserve the required
    /// capacity.
    pub fn try_new(width: usize, height: usize) -> Result<Self, ResourceError> {
        let len = width
            .checked_mul(height)
            .ok_or(ResourceError::AllocationFailed { width, height })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ResourceError::AllocationFailed { width, height })?;
        data.resize(len, 0.0);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a new field with given dimensions, initialized to a value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// # Arguments
    ///
    /// * `x` - X coordinate (0 to width-1)
    /// * `y` - Y coordinate (0 to height-1)
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Sum of all samples (used for conservation checks and reporting)
    #[must_use]
    pub fn total(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// 2-vector field container
///
/// Same layout contract as [`ScalarField`] with one [`Vec2`] sample per cell.
/// Used for the velocity field.
#[derive(Debug, Clone)]
pub struct VectorField {
    /// Sample values in row-major order (`y * width + x`)
    pub data: Vec<Vec2>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl VectorField {
    /// Create a new field with given dimensions, initialized to zero vectors
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![Vec2::zeros(); width * height],
            width,
            height,
        }
    }

    /// Create a new zeroed field, reporting allocation failure instead of
    /// aborting
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::AllocationFailed`] if the cell count
    /// overflows `usize` or the backing `Vec` cannot reserve the required
    /// capacity.
    pub fn try_new(width: usize, height: usize) -> Result<Self, ResourceError> {
        let len = width
            .checked_mul(height)
            .ok_or(ResourceError::AllocationFailed { width, height })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ResourceError::AllocationFailed { width, height })?;
        data.resize(len, Vec2::zeros());
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[Vec2] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [Vec2] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Vec2 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: Vec2) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: Vec2) {
        self.data.fill(value);
    }

    /// Largest sample magnitude (used for reporting)
    #[must_use]
    pub fn max_norm(&self) -> f32 {
        self.data.iter().map(Vec2::norm).fold(0.0, f32::max)
    }
}

/// Current/scratch pair for ping-pong field updates
///
/// Exactly one buffer is the authoritative current state at any instant.
/// Kernels read the current buffer and write the scratch buffer through
/// [`FieldPair::split_mut`]; the borrow checker rules out a kernel touching
/// the buffer it reads from. The orchestrator calls [`FieldPair::swap`] only
/// after the writing kernel has returned, so a half-written buffer can never
/// become current.
#[derive(Debug, Clone)]
pub struct FieldPair<F> {
    current: F,
    scratch: F,
}

impl<F> FieldPair<F> {
    /// Create a pair from two identically sized buffers
    ///
    /// The first buffer starts as the current state.
    #[must_use]
    pub fn new(current: F, scratch: F) -> Self {
        Self { current, scratch }
    }

    /// Read access to the authoritative current buffer
    #[must_use]
    pub fn current(&self) -> &F {
        &self.current
    }

    /// Mutable access to the current buffer
    ///
    /// Only the orchestrator uses this, to clear pressure before the solve;
    /// kernels never write the current buffer.
    pub fn current_mut(&mut self) -> &mut F {
        &mut self.current
    }

    /// Split into (current, scratch) for one kernel invocation
    pub fn split_mut(&mut self) -> (&F, &mut F) {
        (&self.current, &mut self.scratch)
    }

    /// Promote scratch to current after a kernel has fully completed
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_field_creation() {
        let field = ScalarField::new(10, 20);
        assert_eq!(field.width, 10);
        assert_eq!(field.height, 20);
        assert_eq!(field.data.len(), 200);
        assert!(field.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_scalar_field_with_value() {
        let field = ScalarField::with_value(5, 5, 42.0);
        assert!(field.data.iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_scalar_field_get_set() {
        let mut field = ScalarField::new(10, 10);
        field.set(3, 4, 123.45);
        assert_eq!(field.get(3, 4), 123.45);

        // Verify row-major indexing
        let index = 4 * 10 + 3;
        assert_eq!(field.data[index], 123.45);
    }

    #[test]
    fn test_scalar_field_total() {
        let mut field = ScalarField::new(4, 4);
        field.set(0, 0, 1.5);
        field.set(3, 3, 2.5);
        assert_eq!(field.total(), 4.0);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_scalar_field_bounds_check() {
        let field = ScalarField::new(10, 10);
        let _ = field.get(10, 5); // Out of bounds
    }

    #[test]
    fn test_try_new_rejects_oversized_grid() {
        // Large enough that the byte count overflows isize, so the
        // reservation fails deterministically without touching the allocator
        let result = ScalarField::try_new(usize::MAX / 2, 2);
        assert!(result.is_err(), "Oversized grid should fail to allocate");

        let result = VectorField::try_new(usize::MAX, usize::MAX);
        assert!(result.is_err(), "Cell count overflow should fail");
    }

    #[test]
    fn test_vector_field_get_set() {
        let mut field = VectorField::new(8, 8);
        field.set(2, 6, Vec2::new(1.0, -2.0));
        assert_eq!(field.get(2, 6), Vec2::new(1.0, -2.0));
        assert_eq!(field.get(0, 0), Vec2::zeros());
    }

    #[test]
    fn test_vector_field_max_norm() {
        let mut field = VectorField::new(4, 4);
        field.set(1, 1, Vec2::new(3.0, 4.0));
        field.set(2, 2, Vec2::new(0.0, 1.0));
        assert_eq!(field.max_norm(), 5.0);
    }

    #[test]
    fn test_pair_swap_promotes_scratch() {
        let mut pair = FieldPair::new(
            ScalarField::with_value(4, 4, 1.0),
            ScalarField::with_value(4, 4, 2.0),
        );
        assert_eq!(pair.current().get(0, 0), 1.0);

        let (current, scratch) = pair.split_mut();
        assert_eq!(current.get(1, 1), 1.0);
        scratch.set(1, 1, 9.0);

        pair.swap();
        assert_eq!(pair.current().get(1, 1), 9.0);
    }
}
