//! Jacobi relaxation kernel for the pressure solve
//!
//! One sweep of the fixed-point iteration for the discrete Poisson equation
//! `∇²p = divergence` on the standard 5-point stencil:
//!
//! ```text
//! p'(x, y) = (p_left + p_right + p_bottom + p_top + alpha * div(x, y)) * 0.25
//! ```
//!
//! with `alpha = -cellSize²`. Solid or off-grid neighbor pressures are
//! substituted with the center cell's own current pressure (zero-gradient
//! Neumann boundary), matching the divergence kernel's mirror convention.
//! Each sweep reads the full previous iterate, so the orchestrator runs it
//! through a double-buffered pair with a swap after every sweep, starting
//! from a pressure field cleared to zero. Solid cells output 0.

use super::boundary::Boundary;
use super::dispatch::dispatch;

/// Reciprocal of the 5-point stencil's center coefficient
const INVERSE_BETA: f32 = 0.25;

/// Run one Jacobi sweep from `pressure` into `out`
///
/// All slices cover a `width` x `height` grid; `out` must not alias the
/// inputs.
pub fn jacobi_sweep(
    pressure: &[f32],
    divergence: &[f32],
    obstacles: &[f32],
    out: &mut [f32],
    width: usize,
    height: usize,
    cell_size: f32,
) {
    let boundary = Boundary::new(obstacles, width, height);
    let alpha = -(cell_size * cell_size);

    dispatch(out, width, |x, y| {
        if boundary.is_solid(x, y) {
            return 0.0;
        }
        let left = boundary.mirrored_scalar(pressure, x, y, -1, 0);
        let right = boundary.mirrored_scalar(pressure, x, y, 1, 0);
        let bottom = boundary.mirrored_scalar(pressure, x, y, 0, -1);
        let top = boundary.mirrored_scalar(pressure, x, y, 0, 1);
        (left + right + bottom + top + alpha * divergence[y * width + x]) * INVERSE_BETA
    });
}
