//! Rotation matrices from rotation vectors.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// Rotation matrix associated with a rotation vector, via Rodrigues'
/// formula.
///
/// The direction of `v` is the rotation axis and its norm the rotation
/// angle in radians. The zero vector maps exactly to the identity, so no
/// zero-angle division ever happens.
pub fn rotation_matrix(v: &DVector<f64>) -> Result<DMatrix<f64>> {
    if v.len() != 3 {
        return Err(Error::shape(format!(
            "rotation vector has {} coordinates, 3 requested",
            v.len()
        )));
    }

    let theta = v.norm();
    if theta == 0.0 {
        return Ok(DMatrix::identity(3, 3));
    }

    let u = v / theta;
    let (x, y, z) = (u[0], u[1], u[2]);
    let (c, s) = (theta.cos(), theta.sin());

    let c0 = DVector::from_column_slice(&[
        x * x * (1.0 - c) + c,
        x * y * (1.0 - c) + z * s,
        x * z * (1.0 - c) - y * s,
    ]);
    let c1 = DVector::from_column_slice(&[
        x * y * (1.0 - c) - z * s,
        y * y * (1.0 - c) + c,
        y * z * (1.0 - c) + x * s,
    ]);
    let c2 = DVector::from_column_slice(&[
        x * z * (1.0 - c) + y * s,
        y * z * (1.0 - c) - x * s,
        z * z * (1.0 - c) + c,
    ]);

    Ok(DMatrix::from_columns(&[c0, c1, c2]))
}
