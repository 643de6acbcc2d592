//! Newtonian gravitation.

use crate::error::Result;
use crate::calculus::{gradient, DEFAULT_STEP};
use crate::quantity::{Quantity, Value};
use crate::units::si;

use super::Solid;

/// Newtonian constant of gravitation [N·m²·kg⁻²].
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11;

/// The gravitational constant as a quantity.
pub fn gravitational_constant() -> Quantity {
    Quantity::scalar(GRAVITATIONAL_CONSTANT, si::NEWTON_METRE2_PER_KILOGRAM2)
}

/// The gravitational potential generated by `solid`, as a function of
/// position: φ(r) = −G·m / |r − p|.
pub fn gravitational_potential(solid: &Solid) -> Value {
    let source = solid.configuration().position().clone();
    let mass = solid.mass().clone();
    Value::function(move |r: &Quantity| {
        let distance = r.sub(&source)?.norm()?;
        let numerator = gravitational_constant().mul(&mass)?;
        Ok(-numerator.div(&distance)?)
    })
}

/// The gravitational field generated by `solid`, as a function of
/// position: g(r) = −G·m·(r − p)/|r − p|³, zero at the source point.
pub fn gravitational_field(solid: &Solid) -> Value {
    let source = solid.configuration().position().clone();
    let mass = solid.mass().clone();
    Value::function(move |r: &Quantity| {
        let offset = r.sub(&source)?;
        let distance = offset.norm()?;
        if distance.magnitude.as_scalar()? == 0.0 {
            return Ok(Quantity::vector3(0.0, 0.0, 0.0, si::METRE_PER_SECOND2));
        }
        let scaled = Quantity::product(&[gravitational_constant(), mass.clone(), offset])?;
        Ok(-scaled.div(&distance.powi(3)?)?)
    })
}

/// The field derived from a potential: g = −∇φ.
pub fn field_from_potential(potential: &Value) -> Value {
    let grad = gradient(potential, DEFAULT_STEP);
    Value::function(move |r: &Quantity| Ok(-grad.eval(r)?))
}

/// The gravitational force applied on `solid` by the field `g`:
/// F = m·g(p).
pub fn gravitational_force(solid: &Solid, field: &Value) -> Result<Quantity> {
    let g = field.eval(solid.configuration().position())?;
    solid.mass().mul(&g)
}
