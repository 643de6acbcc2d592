//! Geometric primitives: volumes and polylines.

pub mod path;
pub mod volume;

pub use path::*;
pub use volume::*;
