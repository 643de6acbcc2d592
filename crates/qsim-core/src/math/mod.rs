//! Linear-algebra kernel.
//!
//! Pure-number scalar/vector/matrix arithmetic with no unit awareness:
//! the [`Magnitude`] sum type, operand-pairing product dispatch,
//! determinants, Gauss-Jordan inversion, truncated-series matrix
//! exponentials and Rodrigues rotation matrices.

pub mod linalg;
pub mod magnitude;
pub mod rotation;

pub use linalg::*;
pub use magnitude::*;
pub use rotation::*;
