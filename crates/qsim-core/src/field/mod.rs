//! Field sampling over structured 3-D grids.
//!
//! A [`Field`] evaluates a quantity-valued function of position at every
//! node of a structured grid spanning a [`Volume`], appending one full
//! time slice of samples per call, and can interpolate cuboid-topology
//! samples back into a continuous function.

mod grid;
mod interpolation;

pub use grid::*;
pub use interpolation::*;
