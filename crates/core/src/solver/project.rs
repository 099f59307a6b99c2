//! Pressure-gradient subtraction (projection) kernel
//!
//! The final stage of the Chorin-style operator split: subtracting the
//! gradient of the solved pressure removes the divergent component of the
//! velocity field, restoring approximate incompressibility after the
//! non-conservative advection and force stages:
//!
//! ```text
//! v'(x, y) = v(x, y) - gradientScale * ∇p(x, y)
//! ```
//!
//! The gradient uses the same `0.5 / cellSize` central difference and
//! obstacle-mirroring convention as the divergence kernel, so the two
//! operators are discrete adjoints and the projection actually cancels the
//! divergence the solve measured. Solid cells get zero velocity (static
//! no-slip obstacles).

use super::boundary::Boundary;
use super::dispatch::dispatch;
use crate::fields::Vec2;

/// Subtract the pressure gradient from `velocity`, writing to `out`
///
/// All slices cover a `width` x `height` grid; `out` must not alias the
/// inputs.
#[allow(clippy::too_many_arguments)]
pub fn subtract_gradient(
    velocity: &[Vec2],
    pressure: &[f32],
    obstacles: &[f32],
    out: &mut [Vec2],
    width: usize,
    height: usize,
    cell_size: f32,
    gradient_scale: f32,
) {
    let boundary = Boundary::new(obstacles, width, height);
    let half_inv_cell = 0.5 / cell_size;

    dispatch(out, width, |x, y| {
        if boundary.is_solid(x, y) {
            return Vec2::zeros();
        }
        let left = boundary.mirrored_scalar(pressure, x, y, -1, 0);
        let right = boundary.mirrored_scalar(pressure, x, y, 1, 0);
        let bottom = boundary.mirrored_scalar(pressure, x, y, 0, -1);
        let top = boundary.mirrored_scalar(pressure, x, y, 0, 1);
        let gradient = Vec2::new(right - left, top - bottom) * half_inv_cell;
        velocity[y * width + x] - gradient * gradient_scale
    });
}
