//! Simulation configuration
//!
//! All tunable parameters of the solver in one serializable struct, validated
//! eagerly when applied. The orchestrator copies the configuration at the
//! start of each tick, so a tick always runs against one consistent snapshot.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Work-group dimension of the parallel dispatch
///
/// Kernel dispatches decompose the grid into row bands of this many rows,
/// so both resolution axes must be divisible by it. Non-divisible values
/// would under-dispatch a partial strip of boundary cells and are rejected
/// by [`SimConfig::validate`].
pub const WORK_GROUP_SIZE: u32 = 32;

/// Configuration for the smoke simulation
///
/// Defaults reproduce the reference smoke scene: a 512x512 grid stepped at
/// 8 sub-steps per unit time, slow density fade, and buoyancy strong enough
/// to lift a plume against its smoke weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    /// Grid width in cells (positive multiple of [`WORK_GROUP_SIZE`])
    pub width: u32,
    /// Grid height in cells (positive multiple of [`WORK_GROUP_SIZE`])
    pub height: u32,

    /// Integration step per tick
    pub time_step: f32,

    /// Temperature written under the impulse mask each tick
    pub impulse_temperature: f32,
    /// Density written under the impulse mask each tick
    pub impulse_density: f32,

    /// Per-tick survival factor for advected temperature, in (0, 1]
    pub temperature_dissipation: f32,
    /// Per-tick survival factor for advected velocity, in (0, 1]
    pub velocity_dissipation: f32,
    /// Per-tick survival factor for advected density, in (0, 1]
    pub density_dissipation: f32,

    /// Temperature of still air; cells warmer than this rise
    pub ambient_temperature: f32,
    /// Buoyancy coefficient (sigma): vertical force per unit of excess
    /// temperature
    pub smoke_buoyancy: f32,
    /// Smoke weight coefficient (kappa): downward force per unit of density
    pub smoke_weight: f32,

    /// Edge length of one grid cell in world units
    pub cell_size: f32,
    /// Scale applied to the pressure gradient during projection
    pub gradient_scale: f32,

    /// Fixed Jacobi relaxation count for the pressure solve; more iterations
    /// leave less residual divergence
    pub jacobi_iterations: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            time_step: 0.125,
            impulse_temperature: 10.0,
            impulse_density: 1.0,
            temperature_dissipation: 0.99,
            velocity_dissipation: 0.99,
            density_dissipation: 0.9999,
            ambient_temperature: 0.0,
            smoke_buoyancy: 1.0,
            smoke_weight: 0.05,
            cell_size: 1.0,
            gradient_scale: 1.0,
            jacobi_iterations: 50,
        }
    }
}

impl SimConfig {
    /// Check every option against its documented constraint
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: resolution axes that are zero
    /// or not divisible by [`WORK_GROUP_SIZE`], non-positive or non-finite
    /// `time_step`/`cell_size`, dissipation factors outside (0, 1],
    /// non-finite force or impulse magnitudes, or a zero Jacobi iteration
    /// count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0
            || self.height == 0
            || self.width % WORK_GROUP_SIZE != 0
            || self.height % WORK_GROUP_SIZE != 0
        {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }

        check_positive("time_step", self.time_step)?;
        check_positive("cell_size", self.cell_size)?;

        check_dissipation("temperature_dissipation", self.temperature_dissipation)?;
        check_dissipation("velocity_dissipation", self.velocity_dissipation)?;
        check_dissipation("density_dissipation", self.density_dissipation)?;

        check_finite("impulse_temperature", self.impulse_temperature)?;
        check_finite("impulse_density", self.impulse_density)?;
        check_finite("ambient_temperature", self.ambient_temperature)?;
        check_finite("smoke_buoyancy", self.smoke_buoyancy)?;
        check_finite("smoke_weight", self.smoke_weight)?;
        check_finite("gradient_scale", self.gradient_scale)?;

        if self.jacobi_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        Ok(())
    }
}

/// Rejects zero, negatives, NaN, and infinities in one comparison
fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

fn check_dissipation(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::DissipationOutOfRange { name, value })
    }
}
