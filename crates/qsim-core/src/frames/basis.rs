//! Change-of-basis matrices with a lazily-computed inverse.

use std::cell::RefCell;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::{self, Magnitude};
use crate::quantity::Quantity;
use crate::units::Unit;

/// A basis, defined by the matrix taking body-frame coordinates to
/// parent-frame coordinates.
///
/// The reverse matrix is computed on first use and cached in an owned
/// optional slot; once computed it is the true inverse of the forward
/// matrix for the lifetime of the basis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basis {
    matrix_b_to_e: DMatrix<f64>,
    matrix_e_to_b: RefCell<Option<DMatrix<f64>>>,
}

impl Basis {
    /// Build a basis from the body-to-parent matrix.
    pub fn new(matrix_b_to_e: DMatrix<f64>) -> Result<Self> {
        if matrix_b_to_e.nrows() != matrix_b_to_e.ncols() {
            return Err(Error::shape(format!(
                "{}x{} change-of-basis matrix is not square",
                matrix_b_to_e.nrows(),
                matrix_b_to_e.ncols()
            )));
        }
        Ok(Self {
            matrix_b_to_e,
            matrix_e_to_b: RefCell::new(None),
        })
    }

    /// Build a basis with both directions already known, skipping the
    /// deferred inversion. The caller vouches that `matrix_e_to_b` is the
    /// inverse of `matrix_b_to_e`.
    pub fn with_inverse(matrix_b_to_e: DMatrix<f64>, matrix_e_to_b: DMatrix<f64>) -> Result<Self> {
        if matrix_b_to_e.shape() != matrix_e_to_b.shape() {
            return Err(Error::shape(format!(
                "{}x{} and {}x{} change-of-basis matrices disagree",
                matrix_b_to_e.nrows(),
                matrix_b_to_e.ncols(),
                matrix_e_to_b.nrows(),
                matrix_e_to_b.ncols()
            )));
        }
        let basis = Self::new(matrix_b_to_e)?;
        *basis.matrix_e_to_b.borrow_mut() = Some(matrix_e_to_b);
        Ok(basis)
    }

    /// The identity basis of order 3.
    pub fn identity() -> Self {
        Self {
            matrix_b_to_e: DMatrix::identity(3, 3),
            matrix_e_to_b: RefCell::new(None),
        }
    }

    /// The body-to-parent matrix.
    pub fn matrix_b_to_e(&self) -> &DMatrix<f64> {
        &self.matrix_b_to_e
    }

    /// The parent-to-body matrix, inverted on first call and cached.
    pub fn matrix_e_to_b(&self) -> Result<DMatrix<f64>> {
        if let Some(cached) = self.matrix_e_to_b.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let inverse = math::inverse(&self.matrix_b_to_e)?;
        *self.matrix_e_to_b.borrow_mut() = Some(inverse.clone());
        Ok(inverse)
    }

    /// Express `q` (given in the parent frame) in this basis.
    ///
    /// Vectors transform as E⁻¹·v, matrices as E⁻¹·M·E.
    pub fn inside(&self, q: &Quantity) -> Result<Quantity> {
        let e_to_b = Quantity::matrix(self.matrix_e_to_b()?, Unit::dimensionless())?;
        match &q.magnitude {
            Magnitude::Vector(_) => e_to_b.mul(q),
            Magnitude::Matrix(_) => {
                let b_to_e =
                    Quantity::matrix(self.matrix_b_to_e.clone(), Unit::dimensionless())?;
                Quantity::product(&[e_to_b, q.clone(), b_to_e])
            }
            Magnitude::Scalar(_) => Err(Error::shape(
                "no change of basis for a scalar".to_owned(),
            )),
        }
    }

    /// Express `q` (given in this basis) in the parent frame.
    pub fn outside(&self, q: &Quantity) -> Result<Quantity> {
        let b_to_e = Quantity::matrix(self.matrix_b_to_e.clone(), Unit::dimensionless())?;
        match &q.magnitude {
            Magnitude::Vector(_) => b_to_e.mul(q),
            Magnitude::Matrix(_) => {
                let e_to_b = Quantity::matrix(self.matrix_e_to_b()?, Unit::dimensionless())?;
                Quantity::product(&[b_to_e, q.clone(), e_to_b])
            }
            Magnitude::Scalar(_) => Err(Error::shape(
                "no change of basis for a scalar".to_owned(),
            )),
        }
    }
}

impl PartialEq for Basis {
    /// Two bases are the same transform whenever their forward matrices
    /// agree; the cache state is irrelevant.
    fn eq(&self, other: &Self) -> bool {
        self.matrix_b_to_e == other.matrix_b_to_e
    }
}
