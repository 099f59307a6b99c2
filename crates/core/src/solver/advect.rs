//! Semi-Lagrangian advection kernel
//!
//! Transports a quantity through the velocity field by tracing each output
//! cell backward along the flow and sampling the source field at the traced
//! position:
//!
//! ```text
//! q_out(x) = dissipation * q_in(x - u(x) * dt)
//! ```
//!
//! Backward tracing keeps the update unconditionally stable: the sample
//! position is interpolated from existing values, so no time-step restriction
//! applies. Sample coordinates are clamped to the grid, which makes the
//! kernel total for any finite velocity field. Obstacle cells get no special
//! treatment here; containment at solid walls comes from the projection
//! stage keeping wall-adjacent velocities from pointing through walls.
//!
//! Velocity is measured in cells per unit time, so the backward offset is
//! `u * dt` in cell coordinates directly.

use super::dispatch::dispatch;
use crate::fields::Vec2;

/// Parameters for one advection pass
#[derive(Debug, Clone, Copy)]
pub struct AdvectParams {
    /// Integration step
    pub time_step: f32,
    /// Per-tick survival factor in (0, 1]; 1.0 means no decay
    pub dissipation: f32,
}

/// Advect a scalar field through `velocity`
///
/// All slices cover a `width` x `height` grid; `out` must not alias the
/// inputs.
pub fn advect_scalar(
    velocity: &[Vec2],
    source: &[f32],
    out: &mut [f32],
    width: usize,
    height: usize,
    params: AdvectParams,
) {
    dispatch(out, width, |x, y| {
        let trace = trace_back(velocity, width, x, y, params.time_step);
        params.dissipation * sample_scalar(source, width, height, trace.x, trace.y)
    });
}

/// Advect a vector field through `velocity`
///
/// Passing the velocity itself as `source` performs the self-advection step.
pub fn advect_vector(
    velocity: &[Vec2],
    source: &[Vec2],
    out: &mut [Vec2],
    width: usize,
    height: usize,
    params: AdvectParams,
) {
    dispatch(out, width, |x, y| {
        let trace = trace_back(velocity, width, x, y, params.time_step);
        sample_vector(source, width, height, trace.x, trace.y) * params.dissipation
    });
}

#[inline]
fn trace_back(velocity: &[Vec2], width: usize, x: usize, y: usize, time_step: f32) -> Vec2 {
    let v = velocity[y * width + x];
    Vec2::new(x as f32 - v.x * time_step, y as f32 - v.y * time_step)
}

/// Bilinear sample of a scalar grid at a fractional cell position
///
/// Integer positions are cell centers. Coordinates are clamped to the valid
/// domain, so edge rows and columns extend outward (edge-clamp sampling).
#[inline]
fn sample_scalar(field: &[f32], width: usize, height: usize, px: f32, py: f32) -> f32 {
    let (x0, y0, x1, y1, fx, fy) = sample_cells(width, height, px, py);
    let bottom = field[y0 * width + x0] * (1.0 - fx) + field[y0 * width + x1] * fx;
    let top = field[y1 * width + x0] * (1.0 - fx) + field[y1 * width + x1] * fx;
    bottom * (1.0 - fy) + top * fy
}

/// Bilinear sample of a vector grid at a fractional cell position
#[inline]
fn sample_vector(field: &[Vec2], width: usize, height: usize, px: f32, py: f32) -> Vec2 {
    let (x0, y0, x1, y1, fx, fy) = sample_cells(width, height, px, py);
    let bottom = field[y0 * width + x0] * (1.0 - fx) + field[y0 * width + x1] * fx;
    let top = field[y1 * width + x0] * (1.0 - fx) + field[y1 * width + x1] * fx;
    bottom * (1.0 - fy) + top * fy
}

/// Clamp a sample position and split it into the four surrounding cells plus
/// interpolation weights
#[inline]
fn sample_cells(
    width: usize,
    height: usize,
    px: f32,
    py: f32,
) -> (usize, usize, usize, usize, f32, f32) {
    let px = px.clamp(0.0, (width - 1) as f32);
    let py = py.clamp(0.0, (height - 1) as f32);
    let x0 = px.floor() as usize;
    let y0 = py.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = px - x0 as f32;
    let fy = py - y0 as f32;
    (x0, y0, x1, y1, fx, fy)
}
