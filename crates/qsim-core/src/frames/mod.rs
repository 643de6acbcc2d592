//! Reference frames and coordinate transformations.
//!
//! A [`Basis`] maps body-frame coordinates to parent-frame coordinates;
//! a [`Configuration`] adds the position of the body frame's origin.
//! Spherical and cylindrical conversions bridge structured grids and
//! Cartesian positions.

pub mod basis;
pub mod configuration;
pub mod coordinates;

pub use basis::*;
pub use configuration::*;
pub use coordinates::*;
