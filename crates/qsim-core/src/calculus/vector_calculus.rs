//! Gradient, divergence, curl and Laplacians.
//!
//! All operators are assembled component-wise from
//! [`partial_derivative`](crate::calculus::partial_derivative) according
//! to the usual vector-calculus identities.

use crate::error::Result;
use crate::quantity::{self, Quantity, Value};

use super::differential::partial_derivative;

/// Gradient of a scalar field: the vector of axis partials.
pub fn gradient(f: &Value, step: f64) -> Value {
    let f = f.clone();
    Value::function(move |r: &Quantity| {
        let components = (0..r.len())
            .map(|i| {
                partial_derivative(&f, i, step)
                    .eval(r)
                    .map(Value::Constant)
            })
            .collect::<Result<Vec<_>>>()?;
        quantity::vec_of(&components)?.into_constant()
    })
}

/// Divergence of a vector field: the sum of ∂ᵢvᵢ.
pub fn divergence(v: &Value, step: f64) -> Value {
    let v = v.clone();
    Value::function(move |r: &Quantity| {
        let parts = (0..r.len())
            .map(|i| partial_derivative(&quantity::com(i, &v)?, i, step).eval(r))
            .collect::<Result<Vec<_>>>()?;
        Quantity::sum(&parts)
    })
}

/// Scalar Laplacian: divergence of the gradient.
pub fn scalar_laplacian(f: &Value, step: f64) -> Value {
    divergence(&gradient(f, step), step)
}

/// Vector Laplacian: component-wise scalar Laplacian.
pub fn vector_laplacian(v: &Value, step: f64) -> Value {
    let v = v.clone();
    Value::function(move |r: &Quantity| {
        let components = (0..r.len())
            .map(|i| {
                scalar_laplacian(&quantity::com(i, &v)?, step)
                    .eval(r)
                    .map(Value::Constant)
            })
            .collect::<Result<Vec<_>>>()?;
        quantity::vec_of(&components)?.into_constant()
    })
}

/// Curl of a 3-D vector field.
pub fn curl(v: &Value, step: f64) -> Value {
    let v = v.clone();
    Value::function(move |r: &Quantity| {
        let vx = quantity::com(0, &v)?;
        let vy = quantity::com(1, &v)?;
        let vz = quantity::com(2, &v)?;

        let x = partial_derivative(&vz, 1, step)
            .eval(r)?
            .sub(&partial_derivative(&vy, 2, step).eval(r)?)?;
        let y = partial_derivative(&vx, 2, step)
            .eval(r)?
            .sub(&partial_derivative(&vz, 0, step).eval(r)?)?;
        let z = partial_derivative(&vy, 0, step)
            .eval(r)?
            .sub(&partial_derivative(&vx, 1, step).eval(r)?)?;

        quantity::vec_of(&[x.into(), y.into(), z.into()])?.into_constant()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculus::DEFAULT_STEP;
    use crate::units::Unit;
    use approx::assert_relative_eq;

    fn metre() -> Unit {
        Unit::parse("m").unwrap()
    }

    fn at(x: f64, y: f64, z: f64) -> Quantity {
        Quantity::vector3(x, y, z, metre())
    }

    #[test]
    fn test_gradient_of_dot_with_itself() {
        // f(r) = |r|² has gradient 2r.
        let f = Value::function(|r: &Quantity| r.dot(r));
        let grad = gradient(&f, DEFAULT_STEP);
        let g = grad.eval(&at(1.0, -2.0, 0.5)).unwrap();

        let v = g.magnitude.as_vector().unwrap();
        assert_relative_eq!(v[0], 2.0, epsilon = 1e-8);
        assert_relative_eq!(v[1], -4.0, epsilon = 1e-8);
        assert_relative_eq!(v[2], 1.0, epsilon = 1e-8);
        assert_eq!(g.unit, metre());
    }

    #[test]
    fn test_divergence_of_identity_field() {
        // v(r) = r has divergence 3.
        let v = Value::function(|r: &Quantity| Ok(r.clone()));
        let div = divergence(&v, DEFAULT_STEP);
        let d = div.eval(&at(0.3, 0.7, -1.0)).unwrap();
        assert_relative_eq!(d.magnitude.as_scalar().unwrap(), 3.0, epsilon = 1e-8);
        assert!(d.unit.is_dimensionless());
    }

    #[test]
    fn test_curl_of_rigid_rotation() {
        // v(r) = ω × r with ω = ẑ has curl 2ẑ.
        let v = Value::function(|r: &Quantity| {
            let omega = Quantity::vector3(0.0, 0.0, 1.0, Unit::parse("s-1").unwrap());
            omega.cross(r)
        });
        let c = curl(&v, DEFAULT_STEP).eval(&at(0.2, -0.4, 0.9)).unwrap();
        let m = c.magnitude.as_vector().unwrap();
        assert_relative_eq!(m[0], 0.0, epsilon = 1e-8);
        assert_relative_eq!(m[1], 0.0, epsilon = 1e-8);
        assert_relative_eq!(m[2], 2.0, epsilon = 1e-8);
        assert_eq!(c.unit, Unit::parse("s-1").unwrap());
    }

    #[test]
    fn test_curl_of_gradient_vanishes() {
        let f = Value::function(|r: &Quantity| r.component(0)?.mul(&r.component(1)?));
        let c = curl(&gradient(&f, DEFAULT_STEP), DEFAULT_STEP)
            .eval(&at(0.5, 0.5, 0.5))
            .unwrap();
        let m = c.magnitude.as_vector().unwrap();
        for i in 0..3 {
            assert_relative_eq!(m[i], 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_scalar_laplacian_of_quadratic() {
        // f(r) = |r|² has Laplacian 6.
        let f = Value::function(|r: &Quantity| r.dot(r));
        let lap = scalar_laplacian(&f, DEFAULT_STEP);
        let l = lap.eval(&at(1.0, 1.0, 1.0)).unwrap();
        assert_relative_eq!(l.magnitude.as_scalar().unwrap(), 6.0, epsilon = 1e-4);
    }
}
