//! Magnetic dipole force and torque laws.
//!
//! The solid's magnetic moment couples to an external field B(r):
//! torque M × B and force ∇(M·B). Any damping or friction torque stays a
//! parameter of the caller's torque law; nothing here assumes one.

use crate::calculus::{gradient, DEFAULT_STEP};
use crate::error::Result;
use crate::quantity::{self, Quantity, Value};

use super::Solid;

/// The torque exerted on the solid's magnetic moment by the field:
/// τ = M × B(p).
pub fn dipole_torque(solid: &Solid, field: &Value) -> Result<Quantity> {
    let b = field.eval(solid.configuration().position())?;
    solid.magnetic_moment().cross(&b)
}

/// The translational force on the solid's magnetic moment in a
/// non-uniform field: F = ∇(M·B)(p).
pub fn dipole_force(solid: &Solid, field: &Value) -> Result<Quantity> {
    let moment: Value = solid.magnetic_moment().clone().into();
    let coupling = quantity::dot(&moment, field)?;
    gradient(&coupling, DEFAULT_STEP).eval(solid.configuration().position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::Configuration;
    use crate::geometry::Volume;
    use crate::mechanics::Shape;
    use crate::units::si;
    use approx::assert_relative_eq;

    fn dipole(moment: [f64; 3]) -> Solid {
        let shape = Shape::Volume(
            Volume::sphere(Quantity::scalar(0.1, si::METRE)).unwrap(),
        );
        Solid::new(Configuration::origin(), shape)
            .with_magnetic_moment(Quantity::vector3(
                moment[0],
                moment[1],
                moment[2],
                si::AMPERE_METRE2,
            ))
            .unwrap()
    }

    #[test]
    fn test_torque_is_moment_cross_field() {
        let solid = dipole([1.0, 0.0, 0.0]);
        let field = Value::function(|_: &Quantity| {
            Ok(Quantity::vector3(0.0, 2.0, 0.0, si::TESLA))
        });

        let torque = dipole_torque(&solid, &field).unwrap();
        assert_eq!(torque.unit, si::NEWTON_METRE);
        let t = torque.magnitude.as_vector().unwrap();
        assert_relative_eq!(t[0], 0.0);
        assert_relative_eq!(t[1], 0.0);
        assert_relative_eq!(t[2], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aligned_moment_feels_no_torque() {
        let solid = dipole([0.0, 0.0, 1.0]);
        let field = Value::function(|_: &Quantity| {
            Ok(Quantity::vector3(0.0, 0.0, 0.5, si::TESLA))
        });

        let torque = dipole_torque(&solid, &field).unwrap();
        let t = torque.magnitude.as_vector().unwrap();
        for i in 0..3 {
            assert_relative_eq!(t[i], 0.0);
        }
    }

    #[test]
    fn test_uniform_field_exerts_no_force() {
        let solid = dipole([0.0, 0.0, 1.0]);
        let field = Value::function(|_: &Quantity| {
            Ok(Quantity::vector3(0.0, 0.0, 1.0, si::TESLA))
        });

        let force = dipole_force(&solid, &field).unwrap();
        assert_eq!(force.unit, si::NEWTON);
        let f = force.magnitude.as_vector().unwrap();
        for i in 0..3 {
            assert_relative_eq!(f[i], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_gradient_field_pulls_along_the_gradient() {
        // B_z = z tesla/metre: F = ∇(M·B) = (0, 0, M_z).
        let solid = dipole([0.0, 0.0, 2.0]);
        let field = Value::function(|r: &Quantity| {
            let slope = Quantity::scalar(1.0, si::TESLA / si::METRE);
            Quantity::vector3(0.0, 0.0, 1.0, si::DIMENSIONLESS)
                .mul(&slope)?
                .mul(&r.component(2)?)
        });

        let force = dipole_force(&solid, &field).unwrap();
        let f = force.magnitude.as_vector().unwrap();
        assert_relative_eq!(f[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(f[1], 0.0, epsilon = 1e-9);
        assert_relative_eq!(f[2], 2.0, epsilon = 1e-6);
    }
}
