//! Physical quantities and the generalized operator layer.
//!
//! A [`Quantity`] pairs a [`Magnitude`](crate::math::Magnitude) with a
//! [`Unit`](crate::units::Unit). Every operator is defined once at the
//! quantity level, then lifted over [`Value`] so the same operator
//! accepts constants, functions of time or position, and mixtures of
//! both. [`Storage`] accumulates homogeneous quantity sequences.

pub mod storage;
pub mod value;

pub use storage::*;
pub use value::*;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::{self, Magnitude};
use crate::units::Unit;

/// A physical quantity: a scalar, vector or matrix magnitude together
/// with the unit that applies to the whole magnitude.
///
/// Quantities are value objects; every operation builds a fresh one.
/// Equality requires equal magnitude and equal unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub magnitude: Magnitude,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(magnitude: impl Into<Magnitude>, unit: Unit) -> Self {
        Self {
            magnitude: magnitude.into(),
            unit,
        }
    }

    /// A scalar quantity.
    pub fn scalar(value: f64, unit: Unit) -> Self {
        Self::new(value, unit)
    }

    /// A dimensionless scalar.
    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::dimensionless())
    }

    /// A 3-vector quantity.
    pub fn vector3(x: f64, y: f64, z: f64, unit: Unit) -> Self {
        Self::new(Magnitude::vector3(x, y, z), unit)
    }

    /// A vector quantity from raw coordinates.
    pub fn vector(coordinates: &[f64], unit: Unit) -> Self {
        Self::new(DVector::from_column_slice(coordinates), unit)
    }

    /// A square-matrix quantity.
    pub fn matrix(matrix: DMatrix<f64>, unit: Unit) -> Result<Self> {
        Ok(Self {
            magnitude: Magnitude::matrix(matrix)?,
            unit,
        })
    }

    /// Number of coordinates (vector) or order (matrix); 1 for scalars.
    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// The `i`-th component, keeping the unit.
    pub fn component(&self, i: usize) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_component(&self.magnitude, i)?,
            unit: self.unit,
        })
    }

    /// Require this quantity to carry exactly `unit`.
    pub fn expect_unit(&self, unit: Unit) -> Result<()> {
        if self.unit == unit {
            Ok(())
        } else {
            Err(Error::UnitMismatch {
                left: self.unit.to_string(),
                right: unit.to_string(),
            })
        }
    }

    /// Ordering of two scalar quantities sharing a unit.
    pub fn compare(&self, other: &Quantity) -> Result<Ordering> {
        self.expect_unit(other.unit)?;
        let a = self.magnitude.as_scalar()?;
        let b = other.magnitude.as_scalar()?;
        a.partial_cmp(&b).ok_or(Error::Unsupported {
            reason: "comparison of non-finite quantities".to_owned(),
        })
    }

    /// Elementwise sum; all operands must share one unit.
    pub fn sum(args: &[Quantity]) -> Result<Quantity> {
        let unit = Unit::common(&args.iter().map(|q| q.unit).collect::<Vec<_>>())?;
        let magnitudes: Vec<Magnitude> = args.iter().map(|q| q.magnitude.clone()).collect();
        Ok(Quantity {
            magnitude: math::mag_add(&magnitudes)?,
            unit,
        })
    }

    pub fn add(&self, other: &Quantity) -> Result<Quantity> {
        Quantity::sum(&[self.clone(), other.clone()])
    }

    pub fn sub(&self, other: &Quantity) -> Result<Quantity> {
        self.expect_unit(other.unit)?;
        Ok(Quantity {
            magnitude: math::mag_sub(&self.magnitude, &other.magnitude)?,
            unit: self.unit,
        })
    }

    /// Product of all operands; unit exponents add up.
    pub fn product(args: &[Quantity]) -> Result<Quantity> {
        let unit = args
            .iter()
            .map(|q| q.unit)
            .fold(Unit::dimensionless(), |acc, u| acc * u);
        let magnitudes: Vec<Magnitude> = args.iter().map(|q| q.magnitude.clone()).collect();
        Ok(Quantity {
            magnitude: math::mag_mul(&magnitudes)?,
            unit,
        })
    }

    pub fn mul(&self, other: &Quantity) -> Result<Quantity> {
        Quantity::product(&[self.clone(), other.clone()])
    }

    /// Multiply by a bare number, keeping the unit.
    pub fn scale(&self, factor: f64) -> Quantity {
        let magnitude = match &self.magnitude {
            Magnitude::Scalar(s) => Magnitude::Scalar(factor * s),
            Magnitude::Vector(v) => Magnitude::Vector(v * factor),
            Magnitude::Matrix(m) => Magnitude::Matrix(m * factor),
        };
        Quantity {
            magnitude,
            unit: self.unit,
        }
    }

    /// Division by a scalar quantity; unit exponents subtract.
    pub fn div(&self, other: &Quantity) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_div(&self.magnitude, &other.magnitude)?,
            unit: self.unit / other.unit,
        })
    }

    pub fn powi(&self, power: i32) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_powi(&self.magnitude, power)?,
            unit: self.unit.pow_int(power),
        })
    }

    pub fn powf(&self, power: f64) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_powf(&self.magnitude, power)?,
            unit: self.unit.pow_real(power)?,
        })
    }

    /// Exponential of a dimensionless scalar or matrix.
    pub fn exp(&self) -> Result<Quantity> {
        self.unit.expect_dimensionless()?;
        Ok(Quantity {
            magnitude: math::mag_exp(&self.magnitude)?,
            unit: Unit::dimensionless(),
        })
    }

    /// Logarithm of a dimensionless scalar to `base`.
    pub fn log(&self, base: f64) -> Result<Quantity> {
        self.unit.expect_dimensionless()?;
        Ok(Quantity {
            magnitude: math::mag_log(&self.magnitude, base)?,
            unit: Unit::dimensionless(),
        })
    }

    fn trig(&self, f: fn(f64) -> f64) -> Result<Quantity> {
        self.unit.expect_dimensionless()?;
        Ok(Quantity::dimensionless(f(self.magnitude.as_scalar()?)))
    }

    pub fn sin(&self) -> Result<Quantity> {
        self.trig(f64::sin)
    }

    pub fn cos(&self) -> Result<Quantity> {
        self.trig(f64::cos)
    }

    pub fn tan(&self) -> Result<Quantity> {
        self.trig(f64::tan)
    }

    pub fn asin(&self) -> Result<Quantity> {
        self.trig(f64::asin)
    }

    pub fn acos(&self) -> Result<Quantity> {
        self.trig(f64::acos)
    }

    pub fn atan(&self) -> Result<Quantity> {
        self.trig(f64::atan)
    }

    /// Scalar product of two vector quantities.
    pub fn dot(&self, other: &Quantity) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_dot(&self.magnitude, &other.magnitude)?,
            unit: self.unit * other.unit,
        })
    }

    /// Vector product of two 3-vector quantities.
    pub fn cross(&self, other: &Quantity) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_cross(&self.magnitude, &other.magnitude)?,
            unit: self.unit * other.unit,
        })
    }

    /// Euclidean norm, keeping the unit.
    pub fn norm(&self) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_norm(&self.magnitude, 2.0)?,
            unit: self.unit,
        })
    }

    /// Multiplicative inverse; the unit is inverted too.
    pub fn inverse(&self) -> Result<Quantity> {
        Ok(Quantity {
            magnitude: math::mag_inv(&self.magnitude)?,
            unit: self.unit.pow_int(-1),
        })
    }

    /// Determinant of a matrix quantity; the unit is raised to the order.
    pub fn determinant(&self) -> Result<Quantity> {
        let order = self.magnitude.as_matrix()?.nrows() as i32;
        Ok(Quantity {
            magnitude: math::mag_det(&self.magnitude)?,
            unit: self.unit.pow_int(order),
        })
    }

    /// Rotation matrix of a dimensionless rotation vector.
    pub fn rotation(&self) -> Result<Quantity> {
        self.unit.expect_dimensionless()?;
        Ok(Quantity {
            magnitude: math::mag_rotation(&self.magnitude)?,
            unit: Unit::dimensionless(),
        })
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.scale(-1.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.magnitude {
            Magnitude::Scalar(s) => write!(f, "{} {}", s, self.unit),
            Magnitude::Vector(v) => write!(f, "{} {}", v, self.unit),
            Magnitude::Matrix(m) => write!(f, "{} {}", m, self.unit),
        }
    }
}
