//! Parallel compute kernels of the smoke solver
//!
//! Each kernel is a free function over input slices and one output slice,
//! parallelized through [`dispatch`]. Kernels never allocate, never touch a
//! field pair directly, and never swap buffers; the orchestrator in
//! [`crate::sim`] owns sequencing and double-buffer discipline. Stencil
//! kernels share the obstacle convention through [`boundary::Boundary`].

pub mod advect;
pub mod boundary;
pub mod buoyancy;
pub mod dispatch;
pub mod divergence;
pub mod impulse;
pub mod jacobi;
pub mod project;

pub use advect::{advect_scalar, advect_vector, AdvectParams};
pub use boundary::{Boundary, MASK_THRESHOLD};
pub use buoyancy::{apply_buoyancy, BuoyancyParams};
pub use dispatch::dispatch;
pub use divergence::compute_divergence;
pub use impulse::apply_impulse;
pub use jacobi::jacobi_sweep;
pub use project::subtract_gradient;
