//! Rigid-body mechanics.
//!
//! [`Solid`] describes a body (pose, shape, mass, charge, magnetic
//! moment, cached inertia tensor); [`Trajectory`] integrates its motion
//! under caller-supplied force and torque laws with an explicit-Euler
//! scheme and Euler's rigid-body rotation equations in the body frame.
//! The gravitation and magnetism submodules provide the standard force
//! laws the example scenarios plug in.

pub mod euler;
pub mod gravitation;
pub mod magnetism;
pub mod solid;
pub mod trajectory;

pub use euler::*;
pub use gravitation::*;
pub use magnetism::*;
pub use solid::*;
pub use trajectory::*;
