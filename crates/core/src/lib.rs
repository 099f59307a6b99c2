//! Real-time 2D Eulerian smoke simulator
//!
//! Models smoke-like behavior (velocity, temperature, and density transport)
//! under simplified incompressible Navier-Stokes dynamics with the classic
//! stable-fluids operator split: semi-Lagrangian advection, buoyancy and
//! impulse forcing, then a Jacobi pressure solve and gradient-subtraction
//! projection. Every stage is a data-parallel kernel over a uniform grid,
//! and every transported quantity lives in a current/scratch buffer pair so
//! kernels compose without read-after-write hazards.
//!
//! # Usage
//!
//! ```rust
//! use smoke_sim_core::{paint_circle, SimConfig, SmokeSim, Vec2};
//!
//! let mut sim = SmokeSim::new(SimConfig {
//!     width: 64,
//!     height: 64,
//!     ..SimConfig::default()
//! })?;
//!
//! // Mask Provider role: a circular emitter near the bottom of the grid
//! paint_circle(sim.impulse_mut()?, Vec2::new(0.5, 0.1), 0.08);
//!
//! sim.step()?;
//!
//! // Presenter role: read the current state after the tick
//! let smoke = sim.density()?.total();
//! # assert!(smoke > 0.0);
//! # Ok::<(), smoke_sim_core::SimError>(())
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod masks;
pub mod sim;
pub mod solver;

pub use config::{SimConfig, WORK_GROUP_SIZE};
pub use error::{ConfigError, ResourceError, SimError};
pub use fields::{FieldPair, ScalarField, Vec2, VectorField};
pub use masks::{paint_border, paint_circle};
pub use sim::{FieldTarget, FieldView, SmokeSim};
