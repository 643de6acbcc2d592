//! Derivatives by central finite differences.

use crate::error::{Error, Result};
use crate::math::Magnitude;
use crate::quantity::{Quantity, Value};

/// Derivative of a scalar-valued function of a scalar quantity.
///
/// Samples `f` at `x ± step`, where `step` is read in the unit of `x`
/// itself, and divides the difference by `2·step`. The sampled difference
/// must be scalar. The result unit is unit(f)/unit(x).
pub fn derivative(f: &Value, step: f64) -> Value {
    let f = f.clone();
    Value::function(move |x: &Quantity| {
        let h = Quantity::scalar(step, x.unit);
        let ahead = f.eval(&x.add(&h)?)?;
        let behind = f.eval(&x.sub(&h)?)?;
        let delta = ahead.sub(&behind)?;
        match delta.magnitude {
            Magnitude::Scalar(d) => Ok(Quantity::scalar(d / (2.0 * step), delta.unit / x.unit)),
            _ => Err(Error::NonScalarDerivative),
        }
    })
}

/// Partial derivative along coordinate `axis` of a scalar-valued
/// function of a vector quantity.
///
/// Only the chosen coordinate is perturbed; the scalar [`derivative`]
/// does the differencing.
pub fn partial_derivative(f: &Value, axis: usize, step: f64) -> Value {
    let f = f.clone();
    Value::function(move |r: &Quantity| {
        let base = r.magnitude.as_vector()?.clone();
        if axis >= base.len() {
            return Err(Error::shape(format!(
                "axis {axis} of a {}-dimensional argument",
                base.len()
            )));
        }
        let unit = r.unit;
        let f = f.clone();
        let g = Value::function(move |x: &Quantity| {
            let mut shifted = base.clone();
            shifted[axis] += x.magnitude.as_scalar()?;
            f.eval(&Quantity::new(shifted, unit))
        });
        derivative(&g, step).eval(&Quantity::scalar(0.0, r.unit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculus::DEFAULT_STEP;
    use crate::units::Unit;
    use approx::assert_relative_eq;

    fn second() -> Unit {
        Unit::parse("s").unwrap()
    }

    fn metre() -> Unit {
        Unit::parse("m").unwrap()
    }

    #[test]
    fn test_derivative_of_square() {
        // f(t) = t², f'(3 s) = 6 s.
        let f = Value::function(|t: &Quantity| t.mul(t));
        let df = derivative(&f, DEFAULT_STEP);
        let q = df.eval(&Quantity::scalar(3.0, second())).unwrap();
        assert_relative_eq!(q.magnitude.as_scalar().unwrap(), 6.0, epsilon = 1e-9);
        assert_eq!(q.unit, second());
    }

    #[test]
    fn test_derivative_unit_is_quotient() {
        // position(t) = 2 m/s * t; derivative is a speed.
        let f = Value::function(|t: &Quantity| {
            Quantity::scalar(2.0, Unit::parse("m.s-1").unwrap()).mul(t)
        });
        let df = derivative(&f, DEFAULT_STEP);
        let q = df.eval(&Quantity::scalar(1.0, second())).unwrap();
        assert_relative_eq!(q.magnitude.as_scalar().unwrap(), 2.0, epsilon = 1e-9);
        assert_eq!(q.unit, Unit::parse("m.s-1").unwrap());
    }

    #[test]
    fn test_derivative_rejects_vector_valued_functions() {
        let f = Value::function(|t: &Quantity| {
            Ok(Quantity::vector3(
                t.magnitude.as_scalar()?,
                0.0,
                0.0,
                t.unit,
            ))
        });
        let df = derivative(&f, DEFAULT_STEP);
        assert!(matches!(
            df.eval(&Quantity::scalar(1.0, second())),
            Err(Error::NonScalarDerivative)
        ));
    }

    #[test]
    fn test_partial_derivative_picks_its_axis() {
        // f(r) = x·y, ∂f/∂x = y, ∂f/∂y = x.
        let f = Value::function(|r: &Quantity| r.component(0)?.mul(&r.component(1)?));
        let at = Quantity::vector3(2.0, 5.0, 1.0, metre());

        let dx = partial_derivative(&f, 0, DEFAULT_STEP).eval(&at).unwrap();
        assert_relative_eq!(dx.magnitude.as_scalar().unwrap(), 5.0, epsilon = 1e-9);
        assert_eq!(dx.unit, metre());

        let dy = partial_derivative(&f, 1, DEFAULT_STEP).eval(&at).unwrap();
        assert_relative_eq!(dy.magnitude.as_scalar().unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_derivative_rejects_bad_axis() {
        let f = Value::function(|r: &Quantity| r.component(0));
        let at = Quantity::vector3(1.0, 1.0, 1.0, metre());
        assert!(partial_derivative(&f, 3, DEFAULT_STEP).eval(&at).is_err());
    }
}
