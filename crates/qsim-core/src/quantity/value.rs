//! Generalized operator lifting.
//!
//! A [`Value`] is either a concrete quantity or a function of one
//! quantity (time, position) returning a quantity. Every operator in
//! this module accepts any mixture: with all-constant arguments it
//! evaluates eagerly and yields a constant; as soon as one argument is a
//! function, the result is a function that evaluates its arguments at the
//! call point, separates magnitudes and units, and rebuilds a quantity.

use std::fmt;
use std::rc::Rc;

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};
use crate::quantity::Quantity;
use crate::units::Unit;

/// A function of one quantity returning a quantity.
pub type QuantityFn = Rc<dyn Fn(&Quantity) -> Result<Quantity>>;

/// A quantity, or a quantity-valued function of time or position.
#[derive(Clone)]
pub enum Value {
    Constant(Quantity),
    Function(QuantityFn),
}

impl Value {
    /// Wrap a closure as a function value.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Quantity) -> Result<Quantity> + 'static,
    {
        Value::Function(Rc::new(f))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Evaluate at `at`. Constants ignore the argument, behaving as
    /// constant functions.
    pub fn eval(&self, at: &Quantity) -> Result<Quantity> {
        match self {
            Value::Constant(q) => Ok(q.clone()),
            Value::Function(f) => f(at),
        }
    }

    /// Unwrap an eagerly-evaluated constant.
    pub fn into_constant(self) -> Result<Quantity> {
        match self {
            Value::Constant(q) => Ok(q),
            Value::Function(_) => Err(Error::Unsupported {
                reason: "a function value where a constant is required".to_owned(),
            }),
        }
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Constant(q)
    }
}

impl From<f64> for Value {
    fn from(s: f64) -> Self {
        Value::Constant(Quantity::dimensionless(s))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Constant(q) => f.debug_tuple("Constant").field(q).finish(),
            Value::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Lift a quantity-level operator over values.
///
/// All-constant argument lists evaluate once, eagerly. Otherwise the
/// result is a function that re-evaluates every argument at each call.
pub(crate) fn lift<F>(args: Vec<Value>, op: F) -> Result<Value>
where
    F: Fn(&[Quantity]) -> Result<Quantity> + 'static,
{
    if args.iter().any(Value::is_function) {
        return Ok(Value::Function(Rc::new(move |at| {
            let quantities = args
                .iter()
                .map(|v| v.eval(at))
                .collect::<Result<Vec<_>>>()?;
            op(&quantities)
        })));
    }
    let quantities = args
        .into_iter()
        .map(Value::into_constant)
        .collect::<Result<Vec<_>>>()?;
    op(&quantities).map(Value::Constant)
}

/// Generalized sum: all operands must share one unit.
pub fn add(args: &[Value]) -> Result<Value> {
    lift(args.to_vec(), |qs| Quantity::sum(qs))
}

/// Generalized difference.
pub fn sub(a: &Value, b: &Value) -> Result<Value> {
    lift(vec![a.clone(), b.clone()], |qs| qs[0].sub(&qs[1]))
}

/// Generalized product: unit exponents add.
pub fn mul(args: &[Value]) -> Result<Value> {
    lift(args.to_vec(), |qs| Quantity::product(qs))
}

/// Generalized scalar division: unit exponents subtract.
pub fn div(a: &Value, b: &Value) -> Result<Value> {
    lift(vec![a.clone(), b.clone()], |qs| qs[0].div(&qs[1]))
}

/// Generalized integer power.
pub fn powi(v: &Value, power: i32) -> Result<Value> {
    lift(vec![v.clone()], move |qs| qs[0].powi(power))
}

/// Generalized real power.
pub fn powf(v: &Value, power: f64) -> Result<Value> {
    lift(vec![v.clone()], move |qs| qs[0].powf(power))
}

/// Generalized exponential (dimensionless scalar or matrix).
pub fn exp(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].exp())
}

/// Generalized logarithm to `base` (dimensionless).
pub fn log(v: &Value, base: f64) -> Result<Value> {
    lift(vec![v.clone()], move |qs| qs[0].log(base))
}

pub fn sin(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].sin())
}

pub fn cos(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].cos())
}

pub fn tan(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].tan())
}

pub fn asin(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].asin())
}

pub fn acos(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].acos())
}

pub fn atan(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].atan())
}

/// Generalized scalar product.
pub fn dot(a: &Value, b: &Value) -> Result<Value> {
    lift(vec![a.clone(), b.clone()], |qs| qs[0].dot(&qs[1]))
}

/// Generalized vector product.
pub fn cross(a: &Value, b: &Value) -> Result<Value> {
    lift(vec![a.clone(), b.clone()], |qs| qs[0].cross(&qs[1]))
}

/// Generalized Euclidean norm.
pub fn norm(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].norm())
}

/// Generalized multiplicative inverse.
pub fn inv(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].inverse())
}

/// Generalized determinant.
pub fn det(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].determinant())
}

/// Generalized rotation matrix from a rotation vector.
pub fn rot_mat(v: &Value) -> Result<Value> {
    lift(vec![v.clone()], |qs| qs[0].rotation())
}

/// Generalized component extraction.
pub fn com(i: usize, v: &Value) -> Result<Value> {
    lift(vec![v.clone()], move |qs| qs[0].component(i))
}

/// The common unit of the components that are not plain zeros.
///
/// A zero scalar stands in for "no constraint": its unit is ignored when
/// determining the assembled unit. When every component is zero the first
/// one's unit is adopted.
fn assembled_unit(qs: &[Quantity]) -> Result<Unit> {
    let constraining: Vec<Unit> = qs
        .iter()
        .filter(|q| !q.magnitude.is_scalar_zero())
        .map(|q| q.unit)
        .collect();
    if constraining.is_empty() {
        Ok(qs.first().ok_or(Error::EmptyArguments)?.unit)
    } else {
        Unit::common(&constraining)
    }
}

/// Assemble scalar components into a vector quantity.
pub fn vec_of(components: &[Value]) -> Result<Value> {
    lift(components.to_vec(), |qs| {
        let unit = assembled_unit(qs)?;
        let coordinates = qs
            .iter()
            .map(|q| q.magnitude.as_scalar())
            .collect::<Result<Vec<_>>>()?;
        Ok(Quantity::new(DVector::from_vec(coordinates), unit))
    })
}

/// Assemble vector components into a square-matrix quantity, column by
/// column. A zero scalar component becomes a zero column.
pub fn mat_of(columns: &[Value]) -> Result<Value> {
    lift(columns.to_vec(), |qs| {
        let unit = assembled_unit(qs)?;
        let order = qs.len();
        let columns = qs
            .iter()
            .map(|q| {
                if q.magnitude.is_scalar_zero() {
                    Ok(DVector::zeros(order))
                } else {
                    q.magnitude.as_vector().cloned()
                }
            })
            .collect::<Result<Vec<_>>>()?;
        for column in &columns {
            if column.len() != order {
                return Err(Error::shape(format!(
                    "column of size {} in a matrix of order {}",
                    column.len(),
                    order
                )));
            }
        }
        Quantity::matrix(DMatrix::from_columns(&columns), unit)
    })
}
