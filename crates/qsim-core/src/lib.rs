//! # qsim-core
//!
//! Dimensionally-safe numeric simulation core for small-body physics.
//!
//! Physical quantities (scalars, vectors, square matrices) carry a
//! 7-exponent SI unit; arithmetic, trigonometric and calculus operators
//! are lifted so they accept both concrete quantities and functions of
//! time or position; vector fields are sampled over structured 3-D grids
//! and interpolated back into continuous functions; rigid-body motion is
//! integrated with explicit Euler and Euler's rotation equations under
//! caller-supplied force and torque laws.
//!
//! ## Modules
//!
//! - [`units`]: dimension vectors, unit-string parsing and rendering
//! - [`math`]: unit-agnostic scalar/vector/matrix kernel
//! - [`quantity`]: quantities, generalized operator lifting, storage
//! - [`calculus`]: derivatives, vector calculus, Simpson integration
//! - [`frames`]: bases, configurations, coordinate conversions
//! - [`geometry`]: volumes and paths
//! - [`field`]: structured-grid sampling and trilinear interpolation
//! - [`mechanics`]: solids, trajectories, gravitation and magnetism
//! - [`session`]: version-tagged persistence

pub mod calculus;
pub mod error;
pub mod field;
pub mod frames;
pub mod geometry;
pub mod math;
pub mod mechanics;
pub mod quantity;
pub mod session;
pub mod units;

pub use error::{Error, Result};
pub use math::Magnitude;
pub use quantity::{Quantity, Storage, Value};
pub use units::Unit;
