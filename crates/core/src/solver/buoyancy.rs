//! Thermal buoyancy kernel
//!
//! Adds the vertical force term of the smoke model to every cell:
//!
//! ```text
//! v_y += (sigma * (T - T_ambient) - kappa * D) * dt
//! ```
//!
//! Cells warmer than the ambient temperature rise (sigma scales the lift),
//! opposed by the weight of the particulate they carry (kappa scales the
//! drag of density). The x component passes through untouched. No boundary
//! masking is needed: the kernel only adds a per-cell scalar offset and
//! never reads a neighbor.

use super::dispatch::dispatch;
use crate::fields::Vec2;

/// Parameters for one buoyancy pass
#[derive(Debug, Clone, Copy)]
pub struct BuoyancyParams {
    /// Integration step
    pub time_step: f32,
    /// Temperature of still air
    pub ambient_temperature: f32,
    /// Lift per unit of excess temperature (sigma)
    pub smoke_buoyancy: f32,
    /// Downward pull per unit of density (kappa)
    pub smoke_weight: f32,
}

/// Apply the buoyancy force to `velocity`, writing the result to `out`
///
/// All slices cover a `width` x `height` grid; `out` must not alias the
/// inputs.
pub fn apply_buoyancy(
    velocity: &[Vec2],
    temperature: &[f32],
    density: &[f32],
    out: &mut [Vec2],
    width: usize,
    params: BuoyancyParams,
) {
    dispatch(out, width, |x, y| {
        let idx = y * width + x;
        let lift = params.smoke_buoyancy * (temperature[idx] - params.ambient_temperature)
            - params.smoke_weight * density[idx];
        let v = velocity[idx];
        Vec2::new(v.x, v.y + lift * params.time_step)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> BuoyancyParams {
        BuoyancyParams {
            time_step: 0.125,
            ambient_temperature: 0.0,
            smoke_buoyancy: 1.0,
            smoke_weight: 0.05,
        }
    }

    #[test]
    fn test_ambient_cell_with_no_density_is_unchanged() {
        let width = 4;
        let velocity = vec![Vec2::new(0.5, -0.25); width * width];
        let temperature = vec![0.0; width * width];
        let density = vec![0.0; width * width];
        let mut out = vec![Vec2::zeros(); width * width];

        apply_buoyancy(&velocity, &temperature, &density, &mut out, width, params());

        assert_eq!(out, velocity);
    }

    #[test]
    fn test_warm_cell_gains_upward_velocity() {
        let width = 4;
        let velocity = vec![Vec2::zeros(); width * width];
        let mut temperature = vec![0.0; width * width];
        temperature[2 * width + 1] = 10.0;
        let density = vec![0.0; width * width];
        let mut out = vec![Vec2::zeros(); width * width];

        apply_buoyancy(&velocity, &temperature, &density, &mut out, width, params());

        // sigma * (T - T_amb) * dt = 1.0 * 10.0 * 0.125
        assert_relative_eq!(out[2 * width + 1].y, 1.25, max_relative = 1e-6);
        assert_eq!(out[2 * width + 1].x, 0.0);
        assert_eq!(out[0], Vec2::zeros());
    }

    #[test]
    fn test_dense_cell_sinks() {
        let width = 4;
        let velocity = vec![Vec2::zeros(); width * width];
        let temperature = vec![0.0; width * width];
        let mut density = vec![0.0; width * width];
        density[5] = 2.0;
        let mut out = vec![Vec2::zeros(); width * width];

        apply_buoyancy(&velocity, &temperature, &density, &mut out, width, params());

        // -kappa * D * dt = -0.05 * 2.0 * 0.125
        assert_relative_eq!(out[5].y, -0.0125, max_relative = 1e-6);
    }

    #[test]
    fn test_horizontal_component_passes_through() {
        let width = 4;
        let velocity = vec![Vec2::new(3.0, 1.0); width * width];
        let temperature = vec![5.0; width * width];
        let density = vec![1.0; width * width];
        let mut out = vec![Vec2::zeros(); width * width];

        apply_buoyancy(&velocity, &temperature, &density, &mut out, width, params());

        for v in &out {
            assert_eq!(v.x, 3.0);
            assert!(v.y > 1.0, "Warm light smoke must accelerate upward");
        }
    }
}
