//! The magnitude sum type and its kernel operations.
//!
//! Every numeric payload in the core is exactly one of a scalar, a vector
//! or a square matrix. Each kernel operation dispatches exhaustively on
//! the operand pairing and fails with a shape error on any pairing it
//! does not define.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::linalg;
use crate::math::rotation;

/// The unit-agnostic numeric payload of a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Magnitude {
    Scalar(f64),
    Vector(DVector<f64>),
    Matrix(DMatrix<f64>),
}

impl Magnitude {
    /// Wrap a matrix, rejecting rectangular shapes.
    ///
    /// Square-only is a core invariant; this is the sole way to build a
    /// matrix magnitude.
    pub fn matrix(m: DMatrix<f64>) -> Result<Self> {
        if m.nrows() != m.ncols() {
            return Err(Error::shape(format!(
                "{}x{} matrix is not square",
                m.nrows(),
                m.ncols()
            )));
        }
        Ok(Magnitude::Matrix(m))
    }

    /// Build a 3-vector magnitude.
    pub fn vector3(x: f64, y: f64, z: f64) -> Self {
        Magnitude::Vector(DVector::from_column_slice(&[x, y, z]))
    }

    /// The identity matrix of order `n`.
    pub fn identity(n: usize) -> Self {
        Magnitude::Matrix(DMatrix::identity(n, n))
    }

    /// A short operand description for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Magnitude::Scalar(_) => "scalar",
            Magnitude::Vector(_) => "vector",
            Magnitude::Matrix(_) => "matrix",
        }
    }

    /// Number of coordinates of a vector, or the order of a matrix.
    pub fn len(&self) -> usize {
        match self {
            Magnitude::Scalar(_) => 1,
            Magnitude::Vector(v) => v.len(),
            Magnitude::Matrix(m) => m.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this magnitude is the scalar zero.
    ///
    /// Used by vector/matrix assembly, where a plain zero stands in for a
    /// component whose unit should not constrain the result.
    pub fn is_scalar_zero(&self) -> bool {
        matches!(self, Magnitude::Scalar(s) if *s == 0.0)
    }

    pub fn as_scalar(&self) -> Result<f64> {
        match self {
            Magnitude::Scalar(s) => Ok(*s),
            other => Err(Error::shape(format!("{} where a scalar is required", other.kind()))),
        }
    }

    pub fn as_vector(&self) -> Result<&DVector<f64>> {
        match self {
            Magnitude::Vector(v) => Ok(v),
            other => Err(Error::shape(format!("{} where a vector is required", other.kind()))),
        }
    }

    pub fn as_matrix(&self) -> Result<&DMatrix<f64>> {
        match self {
            Magnitude::Matrix(m) => Ok(m),
            other => Err(Error::shape(format!("{} where a matrix is required", other.kind()))),
        }
    }
}

impl From<f64> for Magnitude {
    fn from(s: f64) -> Self {
        Magnitude::Scalar(s)
    }
}

impl From<DVector<f64>> for Magnitude {
    fn from(v: DVector<f64>) -> Self {
        Magnitude::Vector(v)
    }
}

/// Require every operand to share the kind and size of the first one.
fn expect_uniform(args: &[Magnitude]) -> Result<()> {
    let first = args.first().ok_or(Error::EmptyArguments)?;
    for a in &args[1..] {
        if std::mem::discriminant(a) != std::mem::discriminant(first) {
            return Err(Error::shape(format!("{} combined with {}", first.kind(), a.kind())));
        }
        if a.len() != first.len() {
            return Err(Error::shape(format!(
                "sizes {} and {} disagree",
                first.len(),
                a.len()
            )));
        }
    }
    Ok(())
}

/// Elementwise sum of all operands.
pub fn mag_add(args: &[Magnitude]) -> Result<Magnitude> {
    expect_uniform(args)?;
    match &args[0] {
        Magnitude::Scalar(_) => {
            let mut acc = 0.0;
            for a in args {
                acc += a.as_scalar()?;
            }
            Ok(Magnitude::Scalar(acc))
        }
        Magnitude::Vector(first) => {
            let mut acc = first.clone();
            for a in &args[1..] {
                acc += a.as_vector()?;
            }
            Ok(Magnitude::Vector(acc))
        }
        Magnitude::Matrix(first) => {
            let mut acc = first.clone();
            for a in &args[1..] {
                acc += a.as_matrix()?;
            }
            Ok(Magnitude::Matrix(acc))
        }
    }
}

/// Elementwise difference of two operands.
pub fn mag_sub(a: &Magnitude, b: &Magnitude) -> Result<Magnitude> {
    match (a, b) {
        (Magnitude::Scalar(a), Magnitude::Scalar(b)) => Ok(Magnitude::Scalar(a - b)),
        (Magnitude::Vector(a), Magnitude::Vector(b)) if a.len() == b.len() => {
            Ok(Magnitude::Vector(a - b))
        }
        (Magnitude::Matrix(a), Magnitude::Matrix(b)) if a.nrows() == b.nrows() => {
            Ok(Magnitude::Matrix(a - b))
        }
        (a, b) => Err(Error::shape(format!(
            "{} of size {} subtracted from {} of size {}",
            b.kind(),
            b.len(),
            a.kind(),
            a.len()
        ))),
    }
}

/// Product of two operands, dispatched on the operand-type pairing.
///
/// Defined pairings: s*s, s*v, s*M, v*s, M*s, M*v, M*M. Everything else
/// (notably v*v) is a shape error.
fn mag_mul2(a: &Magnitude, b: &Magnitude) -> Result<Magnitude> {
    match (a, b) {
        (Magnitude::Scalar(a), Magnitude::Scalar(b)) => Ok(Magnitude::Scalar(a * b)),
        (Magnitude::Scalar(a), Magnitude::Vector(b)) => Ok(Magnitude::Vector(b * *a)),
        (Magnitude::Scalar(a), Magnitude::Matrix(b)) => Ok(Magnitude::Matrix(b * *a)),
        (Magnitude::Vector(a), Magnitude::Scalar(b)) => Ok(Magnitude::Vector(a * *b)),
        (Magnitude::Matrix(a), Magnitude::Scalar(b)) => Ok(Magnitude::Matrix(a * *b)),
        (Magnitude::Matrix(a), Magnitude::Vector(b)) => {
            if a.ncols() != b.len() {
                return Err(Error::shape(format!(
                    "{}-dimensional matrix * {}-dimensional vector invalid",
                    a.nrows(),
                    b.len()
                )));
            }
            Ok(Magnitude::Vector(a * b))
        }
        (Magnitude::Matrix(a), Magnitude::Matrix(b)) => {
            if a.ncols() != b.nrows() {
                return Err(Error::shape(format!(
                    "{}-dimensional matrix * {}-dimensional matrix invalid",
                    a.nrows(),
                    b.nrows()
                )));
            }
            Ok(Magnitude::Matrix(a * b))
        }
        (a, b) => Err(Error::shape(format!(
            "{} * {} multiplication invalid",
            a.kind(),
            b.kind()
        ))),
    }
}

/// Product of all operands, folded right-associatively so that
/// matrix-vector chains compose in the expected order.
pub fn mag_mul(args: &[Magnitude]) -> Result<Magnitude> {
    let last = args.last().ok_or(Error::EmptyArguments)?;
    let mut acc = last.clone();
    for a in args[..args.len() - 1].iter().rev() {
        acc = mag_mul2(a, &acc)?;
    }
    Ok(acc)
}

/// Division of any operand by a scalar.
pub fn mag_div(a: &Magnitude, b: &Magnitude) -> Result<Magnitude> {
    let b = b.as_scalar()?;
    mag_mul2(a, &Magnitude::Scalar(1.0 / b))
}

/// Integer power: any scalar exponent, or repeated multiplication for a
/// matrix (power zero is the identity, negative matrix powers fail).
pub fn mag_powi(a: &Magnitude, power: i32) -> Result<Magnitude> {
    match a {
        Magnitude::Scalar(s) => Ok(Magnitude::Scalar(s.powi(power))),
        Magnitude::Matrix(m) => {
            if power < 0 {
                return Err(Error::Unsupported {
                    reason: format!("power {power} not defined for a matrix"),
                });
            }
            let n = m.nrows();
            let mut acc = DMatrix::identity(n, n);
            for _ in 0..power {
                acc = &acc * m;
            }
            Ok(Magnitude::Matrix(acc))
        }
        Magnitude::Vector(_) => Err(Error::Unsupported {
            reason: format!("power {power} not defined for a vector"),
        }),
    }
}

/// Real power, defined for scalars only.
pub fn mag_powf(a: &Magnitude, power: f64) -> Result<Magnitude> {
    Ok(Magnitude::Scalar(a.as_scalar()?.powf(power)))
}

/// Exponential of a scalar, or matrix exponential by truncated series.
pub fn mag_exp(a: &Magnitude) -> Result<Magnitude> {
    match a {
        Magnitude::Scalar(s) => Ok(Magnitude::Scalar(s.exp())),
        Magnitude::Matrix(m) => Ok(Magnitude::Matrix(linalg::matrix_exp(m)?)),
        Magnitude::Vector(_) => Err(Error::Unsupported {
            reason: "exponential not defined for a vector".to_owned(),
        }),
    }
}

/// Logarithm of a scalar to the given base.
pub fn mag_log(a: &Magnitude, base: f64) -> Result<Magnitude> {
    Ok(Magnitude::Scalar(a.as_scalar()?.log(base)))
}

/// Scalar (dot) product of two vectors of equal length.
pub fn mag_dot(a: &Magnitude, b: &Magnitude) -> Result<Magnitude> {
    let (a, b) = (a.as_vector()?, b.as_vector()?);
    if a.len() != b.len() {
        return Err(Error::shape(format!("sizes {} and {} disagree", a.len(), b.len())));
    }
    Ok(Magnitude::Scalar(a.dot(b)))
}

/// Vector (cross) product of two 3-vectors.
pub fn mag_cross(a: &Magnitude, b: &Magnitude) -> Result<Magnitude> {
    let (a, b) = (a.as_vector()?, b.as_vector()?);
    if a.len() != 3 || b.len() != 3 {
        return Err(Error::shape(format!(
            "cross product of sizes {} and {}, 3 requested",
            a.len(),
            b.len()
        )));
    }
    Ok(Magnitude::vector3(
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ))
}

/// p-norm of a scalar (absolute value) or a vector.
pub fn mag_norm(a: &Magnitude, p: f64) -> Result<Magnitude> {
    match a {
        Magnitude::Scalar(s) => Ok(Magnitude::Scalar(s.abs())),
        Magnitude::Vector(v) => {
            let sum: f64 = v.iter().map(|c| c.abs().powf(p)).sum();
            Ok(Magnitude::Scalar(sum.powf(1.0 / p)))
        }
        Magnitude::Matrix(_) => Err(Error::Unsupported {
            reason: format!("norm {p} not defined for a matrix"),
        }),
    }
}

/// Determinant of a matrix magnitude.
pub fn mag_det(a: &Magnitude) -> Result<Magnitude> {
    Ok(Magnitude::Scalar(linalg::determinant(a.as_matrix()?)?))
}

/// Inverse of a scalar or a square matrix.
pub fn mag_inv(a: &Magnitude) -> Result<Magnitude> {
    match a {
        Magnitude::Scalar(s) => Ok(Magnitude::Scalar(1.0 / s)),
        Magnitude::Matrix(m) => Ok(Magnitude::Matrix(linalg::inverse(m)?)),
        Magnitude::Vector(_) => Err(Error::Unsupported {
            reason: "inverse not defined for a vector".to_owned(),
        }),
    }
}

/// Rotation matrix from a rotation-vector magnitude.
pub fn mag_rotation(a: &Magnitude) -> Result<Magnitude> {
    Ok(Magnitude::Matrix(rotation::rotation_matrix(a.as_vector()?)?))
}

/// The `i`-th coordinate of a vector magnitude.
pub fn mag_component(a: &Magnitude, i: usize) -> Result<Magnitude> {
    let v = a.as_vector()?;
    if i >= v.len() {
        return Err(Error::shape(format!(
            "component {i} of a {}-dimensional vector",
            v.len()
        )));
    }
    Ok(Magnitude::Scalar(v[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dmatrix;

    fn vec3(x: f64, y: f64, z: f64) -> Magnitude {
        Magnitude::vector3(x, y, z)
    }

    #[test]
    fn test_add_dispatches_on_kind() {
        let s = mag_add(&[1.0.into(), 2.0.into(), 3.0.into()]).unwrap();
        assert_eq!(s, Magnitude::Scalar(6.0));

        let v = mag_add(&[vec3(1.0, 0.0, 0.0), vec3(0.0, 2.0, 0.0)]).unwrap();
        assert_eq!(v, vec3(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_add_rejects_mixed_kinds_and_sizes() {
        assert!(mag_add(&[Magnitude::Scalar(1.0), vec3(1.0, 0.0, 0.0)]).is_err());
        assert!(mag_add(&[
            vec3(1.0, 0.0, 0.0),
            Magnitude::Vector(DVector::zeros(2))
        ])
        .is_err());
    }

    #[test]
    fn test_product_pairings() {
        let m = Magnitude::matrix(dmatrix![
            0.0, -1.0;
            1.0, 0.0
        ])
        .unwrap();
        let v = Magnitude::Vector(DVector::from_column_slice(&[1.0, 0.0]));

        let mv = mag_mul(&[m.clone(), v.clone()]).unwrap();
        assert_eq!(mv, Magnitude::Vector(DVector::from_column_slice(&[0.0, 1.0])));

        let sv = mag_mul(&[Magnitude::Scalar(2.0), v.clone()]).unwrap();
        assert_eq!(sv, Magnitude::Vector(DVector::from_column_slice(&[2.0, 0.0])));

        // v * v is not a defined pairing.
        assert!(mag_mul(&[v.clone(), v]).is_err());
    }

    #[test]
    fn test_product_folds_right_associatively() {
        // M * (M * v)
        let m = Magnitude::matrix(dmatrix![
            0.0, -1.0;
            1.0, 0.0
        ])
        .unwrap();
        let v = Magnitude::Vector(DVector::from_column_slice(&[1.0, 0.0]));
        let mmv = mag_mul(&[m.clone(), m, v]).unwrap();
        assert_eq!(
            mmv,
            Magnitude::Vector(DVector::from_column_slice(&[-1.0, 0.0]))
        );
    }

    #[test]
    fn test_product_rejects_size_disagreement() {
        let a = Magnitude::matrix(DMatrix::identity(3, 3)).unwrap();
        let b = Magnitude::matrix(DMatrix::identity(2, 2)).unwrap();
        assert!(mag_mul(&[a, b]).is_err());
    }

    #[test]
    fn test_division_is_scalar_only() {
        assert!(mag_div(&vec3(2.0, 4.0, 6.0), &Magnitude::Scalar(2.0)).is_ok());
        assert!(mag_div(&Magnitude::Scalar(1.0), &vec3(1.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_matrix_power_zero_is_identity() {
        let m = Magnitude::matrix(dmatrix![
            2.0, 1.0;
            0.0, 2.0
        ])
        .unwrap();
        assert_eq!(mag_powi(&m, 0).unwrap(), Magnitude::identity(2));
        assert!(mag_powi(&m, -1).is_err());
    }

    #[test]
    fn test_norm_and_dot_and_cross() {
        let v = vec3(3.0, 4.0, 0.0);
        assert_eq!(mag_norm(&v, 2.0).unwrap(), Magnitude::Scalar(5.0));

        let d = mag_dot(&vec3(1.0, 2.0, 3.0), &vec3(4.0, 5.0, 6.0)).unwrap();
        assert_eq!(d, Magnitude::Scalar(32.0));

        let c = mag_cross(&vec3(1.0, 0.0, 0.0), &vec3(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(c, vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_scalar_inverse() {
        let inv = mag_inv(&Magnitude::Scalar(4.0)).unwrap();
        assert_relative_eq!(inv.as_scalar().unwrap(), 0.25);
    }

    #[test]
    fn test_matrix_constructor_rejects_rectangular() {
        assert!(Magnitude::matrix(DMatrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_component_extraction() {
        let v = vec3(1.0, 2.0, 3.0);
        assert_eq!(mag_component(&v, 1).unwrap(), Magnitude::Scalar(2.0));
        assert!(mag_component(&v, 3).is_err());
    }
}
