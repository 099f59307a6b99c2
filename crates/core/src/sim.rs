//! Simulation orchestrator and resource manager
//!
//! [`SmokeSim`] owns every grid field of the simulation, provisions them for
//! the configured resolution, and runs the fixed per-tick kernel sequence:
//!
//! 1. Advect velocity, temperature, and density; swap all three pairs.
//! 2. Apply buoyancy to velocity; swap.
//! 3. Apply the impulse fill to temperature and density; swap both.
//! 4. Compute divergence from the current velocity.
//! 5. Clear pressure and run the fixed Jacobi iteration count, swapping
//!    after every sweep.
//! 6. Subtract the pressure gradient from velocity; swap.
//!
//! The tick is all-or-nothing: `step` takes `&mut self` and returns only
//! after the final swap, so no caller can observe a half-stepped state or
//! cancel mid-tick. Mask mutation (the Mask Provider role) and field reads
//! (the Presenter role) borrow the simulator, which sequences them against
//! ticks and reconfigurations at compile time.

use crate::config::SimConfig;
use crate::error::{ResourceError, SimError};
use crate::fields::{FieldPair, ScalarField, VectorField};
use crate::solver::{
    advect_scalar, advect_vector, apply_buoyancy, apply_impulse, compute_divergence, jacobi_sweep,
    subtract_gradient, AdvectParams, BuoyancyParams,
};
use tracing::{debug, info};

/// One observable field of the simulation state
///
/// Presenter-facing handle for the uniform readout accessor; every grid the
/// simulator owns is listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// Current velocity (vector-valued)
    Velocity,
    /// Current temperature
    Temperature,
    /// Current smoke density
    Density,
    /// Pressure from the latest solve
    Pressure,
    /// Divergence measured before the latest solve
    Divergence,
    /// Obstacle mask as painted by the host
    Obstacles,
    /// Impulse mask as painted by the host
    Impulse,
}

/// Read-only borrow of one field, scalar or vector depending on the target
#[derive(Debug, Clone, Copy)]
pub enum FieldView<'a> {
    Scalar(&'a ScalarField),
    Vector(&'a VectorField),
}

/// Every grid field of one simulation, allocated together at one resolution
///
/// Dropped wholesale on reconfiguration, so a resolution change can never
/// leave a stale-sized field behind.
#[derive(Debug)]
struct SimBuffers {
    velocity: FieldPair<VectorField>,
    temperature: FieldPair<ScalarField>,
    density: FieldPair<ScalarField>,
    pressure: FieldPair<ScalarField>,
    divergence: ScalarField,
    obstacles: ScalarField,
    impulse: ScalarField,
}

impl SimBuffers {
    fn allocate(width: usize, height: usize) -> Result<Self, ResourceError> {
        let vector_pair = || -> Result<FieldPair<VectorField>, ResourceError> {
            Ok(FieldPair::new(
                VectorField::try_new(width, height)?,
                VectorField::try_new(width, height)?,
            ))
        };
        let scalar_pair = || -> Result<FieldPair<ScalarField>, ResourceError> {
            Ok(FieldPair::new(
                ScalarField::try_new(width, height)?,
                ScalarField::try_new(width, height)?,
            ))
        };

        Ok(Self {
            velocity: vector_pair()?,
            temperature: scalar_pair()?,
            density: scalar_pair()?,
            pressure: scalar_pair()?,
            divergence: ScalarField::try_new(width, height)?,
            obstacles: ScalarField::try_new(width, height)?,
            impulse: ScalarField::try_new(width, height)?,
        })
    }
}

/// Grid-based 2D smoke simulator
///
/// Construct with a validated [`SimConfig`], paint the masks, then call
/// [`SmokeSim::step`] once per frame. After a failed reconfiguration the
/// simulator holds no grids and every step/read reports
/// [`SimError::NotReady`] until a reconfigure succeeds.
#[derive(Debug)]
pub struct SmokeSim {
    config: SimConfig,
    buffers: Option<SimBuffers>,
    ticks: u64,
}

impl SmokeSim {
    /// Create a simulator with all fields zero-initialized
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid configuration and
    /// [`SimError::Resource`] if the grids cannot be allocated.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let buffers = SimBuffers::allocate(config.width as usize, config.height as usize)?;

        info!(
            "Smoke simulator initialized: {}x{} grid, dt={}, {} Jacobi iterations",
            config.width, config.height, config.time_step, config.jacobi_iterations
        );

        Ok(Self {
            config,
            buffers: Some(buffers),
            ticks: 0,
        })
    }

    /// Apply a new configuration, reallocating every grid field
    ///
    /// All fields come back zeroed at the new dimensions; nothing from the
    /// previous resolution survives. The old grids are released before the
    /// new ones are allocated, so a failed allocation leaves the simulator
    /// not ready rather than silently keeping the stale resolution.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid configuration (the
    /// previous state is kept untouched) and [`SimError::Resource`] if
    /// allocation at the new resolution fails (the simulator is then not
    /// ready).
    pub fn reconfigure(&mut self, config: SimConfig) -> Result<(), SimError> {
        config.validate()?;

        self.buffers = None;
        self.config = config;
        self.ticks = 0;
        let buffers = SimBuffers::allocate(config.width as usize, config.height as usize)?;
        self.buffers = Some(buffers);

        info!(
            "Smoke simulator reconfigured: {}x{} grid",
            config.width, config.height
        );
        Ok(())
    }

    /// The configuration the next tick will run under
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Whether the simulator holds grids and can step
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.buffers.is_some()
    }

    /// Ticks completed since construction or the last reconfiguration
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the simulation by one tick
    ///
    /// Runs the full fixed kernel sequence against a snapshot of the
    /// current configuration. Kernel math is total, so once a tick starts
    /// it always completes.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if a prior reconfiguration failed and
    /// no grids are allocated.
    pub fn step(&mut self) -> Result<(), SimError> {
        // Configuration snapshot: the whole tick runs against one copy
        let config = self.config;
        let buffers = self.buffers.as_mut().ok_or(SimError::NotReady)?;

        let width = config.width as usize;
        let height = config.height as usize;

        // 1. Transport everything through the current velocity, then settle
        // all three pairs. Temperature and density must sample the same
        // pre-advection velocity the velocity field itself is advected by.
        let velocity_advect = AdvectParams {
            time_step: config.time_step,
            dissipation: config.velocity_dissipation,
        };
        let temperature_advect = AdvectParams {
            time_step: config.time_step,
            dissipation: config.temperature_dissipation,
        };
        let density_advect = AdvectParams {
            time_step: config.time_step,
            dissipation: config.density_dissipation,
        };

        {
            let velocity = buffers.velocity.current().as_slice();
            let (source, out) = buffers.temperature.split_mut();
            advect_scalar(
                velocity,
                source.as_slice(),
                out.as_mut_slice(),
                width,
                height,
                temperature_advect,
            );
        }
        {
            let velocity = buffers.velocity.current().as_slice();
            let (source, out) = buffers.density.split_mut();
            advect_scalar(
                velocity,
                source.as_slice(),
                out.as_mut_slice(),
                width,
                height,
                density_advect,
            );
        }
        {
            let (current, out) = buffers.velocity.split_mut();
            advect_vector(
                current.as_slice(),
                current.as_slice(),
                out.as_mut_slice(),
                width,
                height,
                velocity_advect,
            );
        }
        buffers.velocity.swap();
        buffers.temperature.swap();
        buffers.density.swap();

        // 2. Buoyancy
        {
            let temperature = buffers.temperature.current().as_slice();
            let density = buffers.density.current().as_slice();
            let (current, out) = buffers.velocity.split_mut();
            apply_buoyancy(
                current.as_slice(),
                temperature,
                density,
                out.as_mut_slice(),
                width,
                BuoyancyParams {
                    time_step: config.time_step,
                    ambient_temperature: config.ambient_temperature,
                    smoke_buoyancy: config.smoke_buoyancy,
                    smoke_weight: config.smoke_weight,
                },
            );
        }
        buffers.velocity.swap();

        // 3. Impulse injection
        {
            let (source, out) = buffers.temperature.split_mut();
            apply_impulse(
                source.as_slice(),
                buffers.impulse.as_slice(),
                config.impulse_temperature,
                out.as_mut_slice(),
                width,
            );
        }
        buffers.temperature.swap();
        {
            let (source, out) = buffers.density.split_mut();
            apply_impulse(
                source.as_slice(),
                buffers.impulse.as_slice(),
                config.impulse_density,
                out.as_mut_slice(),
                width,
            );
        }
        buffers.density.swap();

        // 4. Divergence of the post-force velocity
        compute_divergence(
            buffers.velocity.current().as_slice(),
            buffers.obstacles.as_slice(),
            buffers.divergence.as_mut_slice(),
            width,
            height,
            config.cell_size,
        );

        // 5. Pressure solve from a zero initial guess
        buffers.pressure.current_mut().fill(0.0);
        for _ in 0..config.jacobi_iterations {
            let (current, out) = buffers.pressure.split_mut();
            jacobi_sweep(
                current.as_slice(),
                buffers.divergence.as_slice(),
                buffers.obstacles.as_slice(),
                out.as_mut_slice(),
                width,
                height,
                config.cell_size,
            );
            buffers.pressure.swap();
        }

        // 6. Projection
        {
            let pressure = buffers.pressure.current().as_slice();
            let (current, out) = buffers.velocity.split_mut();
            subtract_gradient(
                current.as_slice(),
                pressure,
                buffers.obstacles.as_slice(),
                out.as_mut_slice(),
                width,
                height,
                config.cell_size,
                config.gradient_scale,
            );
        }
        buffers.velocity.swap();

        self.ticks += 1;
        debug!(
            "Tick {} complete: total density {:.4}, peak speed {:.4}",
            self.ticks,
            buffers.density.current().total(),
            buffers.velocity.current().max_norm()
        );
        Ok(())
    }

    /// Uniform read accessor over every observable field
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn read(&self, target: FieldTarget) -> Result<FieldView<'_>, SimError> {
        let buffers = self.buffers.as_ref().ok_or(SimError::NotReady)?;
        Ok(match target {
            FieldTarget::Velocity => FieldView::Vector(buffers.velocity.current()),
            FieldTarget::Temperature => FieldView::Scalar(buffers.temperature.current()),
            FieldTarget::Density => FieldView::Scalar(buffers.density.current()),
            FieldTarget::Pressure => FieldView::Scalar(buffers.pressure.current()),
            FieldTarget::Divergence => FieldView::Scalar(&buffers.divergence),
            FieldTarget::Obstacles => FieldView::Scalar(&buffers.obstacles),
            FieldTarget::Impulse => FieldView::Scalar(&buffers.impulse),
        })
    }

    /// Current velocity field
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn velocity(&self) -> Result<&VectorField, SimError> {
        self.buffers
            .as_ref()
            .map(|b| b.velocity.current())
            .ok_or(SimError::NotReady)
    }

    /// Current temperature field
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn temperature(&self) -> Result<&ScalarField, SimError> {
        self.buffers
            .as_ref()
            .map(|b| b.temperature.current())
            .ok_or(SimError::NotReady)
    }

    /// Current density field
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn density(&self) -> Result<&ScalarField, SimError> {
        self.buffers
            .as_ref()
            .map(|b| b.density.current())
            .ok_or(SimError::NotReady)
    }

    /// Pressure field from the latest solve
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn pressure(&self) -> Result<&ScalarField, SimError> {
        self.buffers
            .as_ref()
            .map(|b| b.pressure.current())
            .ok_or(SimError::NotReady)
    }

    /// Divergence field measured before the latest solve
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn divergence(&self) -> Result<&ScalarField, SimError> {
        self.buffers
            .as_ref()
            .map(|b| &b.divergence)
            .ok_or(SimError::NotReady)
    }

    /// Mutable obstacle mask for the Mask Provider
    ///
    /// Samples at or above the activity threshold mark solid cells.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn obstacles_mut(&mut self) -> Result<&mut ScalarField, SimError> {
        self.buffers
            .as_mut()
            .map(|b| &mut b.obstacles)
            .ok_or(SimError::NotReady)
    }

    /// Mutable impulse mask for the Mask Provider
    ///
    /// Samples at or above the activity threshold mark emitter cells.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotReady`] if no grids are allocated.
    pub fn impulse_mut(&mut self) -> Result<&mut ScalarField, SimError> {
        self.buffers
            .as_mut()
            .map(|b| &mut b.impulse)
            .ok_or(SimError::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimConfig {
        SimConfig {
            width: 32,
            height: 32,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_new_simulator_starts_zeroed() {
        let sim = SmokeSim::new(small_config()).unwrap();

        assert!(sim.is_ready());
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.density().unwrap().total(), 0.0);
        assert_eq!(sim.velocity().unwrap().max_norm(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = SimConfig {
            width: 33,
            ..small_config()
        };
        assert!(matches!(SmokeSim::new(config), Err(SimError::Config(_))));
    }

    #[test]
    fn test_step_with_empty_masks_stays_at_rest() {
        let mut sim = SmokeSim::new(SimConfig {
            impulse_temperature: 0.0,
            impulse_density: 0.0,
            ..small_config()
        })
        .unwrap();

        sim.step().unwrap();
        sim.step().unwrap();

        assert_eq!(sim.ticks(), 2);
        assert_eq!(sim.density().unwrap().total(), 0.0);
        assert_eq!(sim.velocity().unwrap().max_norm(), 0.0);
    }

    #[test]
    fn test_impulse_mask_injects_density_each_tick() {
        let mut sim = SmokeSim::new(small_config()).unwrap();
        sim.impulse_mut().unwrap().set(16, 4, 1.0);

        sim.step().unwrap();

        let density = sim.density().unwrap();
        assert_eq!(density.get(16, 4), sim.config().impulse_density);
        let temperature = sim.temperature().unwrap();
        assert_eq!(temperature.get(16, 4), sim.config().impulse_temperature);
    }

    #[test]
    fn test_heated_plume_rises() {
        let mut sim = SmokeSim::new(small_config()).unwrap();
        sim.impulse_mut().unwrap().set(16, 4, 1.0);

        for _ in 0..10 {
            sim.step().unwrap();
        }

        // Buoyancy from the injected heat must have produced upward motion
        let velocity = sim.velocity().unwrap();
        let mut peak_vertical: f32 = 0.0;
        for y in 0..32 {
            for x in 0..32 {
                peak_vertical = peak_vertical.max(velocity.get(x, y).y);
            }
        }
        assert!(
            peak_vertical > 0.0,
            "Injected heat should drive upward velocity, got {peak_vertical}"
        );
    }

    #[test]
    fn test_read_covers_every_target() {
        let sim = SmokeSim::new(small_config()).unwrap();

        for target in [
            FieldTarget::Velocity,
            FieldTarget::Temperature,
            FieldTarget::Density,
            FieldTarget::Pressure,
            FieldTarget::Divergence,
            FieldTarget::Obstacles,
            FieldTarget::Impulse,
        ] {
            match sim.read(target).unwrap() {
                FieldView::Scalar(field) => {
                    assert_eq!(field.width, 32);
                    assert_eq!(field.height, 32);
                }
                FieldView::Vector(field) => {
                    assert_eq!(target, FieldTarget::Velocity);
                    assert_eq!(field.width, 32);
                    assert_eq!(field.height, 32);
                }
            }
        }
    }

    #[test]
    fn test_failed_reconfigure_leaves_not_ready() {
        let mut sim = SmokeSim::new(small_config()).unwrap();

        // Aligned resolution whose cell count overflows the byte capacity
        let oversized = SimConfig {
            width: u32::MAX - 31, // 4294967264, a multiple of 32
            height: u32::MAX - 31,
            ..small_config()
        };
        assert!(matches!(
            sim.reconfigure(oversized),
            Err(SimError::Resource(_))
        ));

        assert!(!sim.is_ready());
        assert_eq!(sim.step(), Err(SimError::NotReady));
        assert!(matches!(sim.density(), Err(SimError::NotReady)));

        // A valid reconfigure restores service
        sim.reconfigure(small_config()).unwrap();
        assert!(sim.is_ready());
        sim.step().unwrap();
    }
}
