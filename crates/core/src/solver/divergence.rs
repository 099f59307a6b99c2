//! Velocity divergence kernel
//!
//! Computes the discrete divergence of the velocity field by central
//! differences over the four axis neighbors:
//!
//! ```text
//! div(x, y) = 0.5 / cellSize * (u_right - u_left + v_top - v_bottom)
//! ```
//!
//! Solid or off-grid neighbors mirror the center cell's velocity through
//! [`Boundary`], so walls neither absorb nor create divergence. The output
//! feeds the Jacobi pressure solve; solid cells themselves output 0 so every
//! cell of the divergence field stays defined.

use super::boundary::Boundary;
use super::dispatch::dispatch;
use crate::fields::Vec2;

/// Compute the divergence of `velocity` into `out`
///
/// All slices cover a `width` x `height` grid; `out` must not alias the
/// inputs.
pub fn compute_divergence(
    velocity: &[Vec2],
    obstacles: &[f32],
    out: &mut [f32],
    width: usize,
    height: usize,
    cell_size: f32,
) {
    let boundary = Boundary::new(obstacles, width, height);
    let half_inv_cell = 0.5 / cell_size;

    dispatch(out, width, |x, y| {
        if boundary.is_solid(x, y) {
            return 0.0;
        }
        let left = boundary.mirrored_velocity(velocity, x, y, -1, 0).x;
        let right = boundary.mirrored_velocity(velocity, x, y, 1, 0).x;
        let bottom = boundary.mirrored_velocity(velocity, x, y, 0, -1).y;
        let top = boundary.mirrored_velocity(velocity, x, y, 0, 1).y;
        half_inv_cell * (right - left + top - bottom)
    });
}
