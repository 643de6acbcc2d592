//! Euler's rigid-body rotation equations and basis construction.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};
use crate::frames::Basis;
use crate::quantity::Quantity;
use crate::units::si;

/// Angular acceleration from Euler's rotation equations, cyclic over the
/// body axes:
///
/// αᵢ = (ωⱼ·ωₖ·(Iⱼ − Iₖ) + Mᵢ) / Iᵢ
///
/// `inertia` must be the diagonal inertia tensor in the body frame
/// (kg·m²), `torque` the torque in the body frame (N·m) and `omega` the
/// angular velocity (s⁻¹). The result is in s⁻².
pub fn euler_rotation(inertia: &Quantity, torque: &Quantity, omega: &Quantity) -> Result<Quantity> {
    inertia.expect_unit(si::KILOGRAM_METRE2)?;
    torque.expect_unit(si::NEWTON_METRE)?;
    omega.expect_unit(si::PER_SECOND)?;

    let i = inertia.magnitude.as_matrix()?;
    let m = torque.magnitude.as_vector()?;
    let w = omega.magnitude.as_vector()?;
    if i.nrows() != 3 || m.len() != 3 || w.len() != 3 {
        return Err(Error::shape(
            "rigid-body rotation is three-dimensional".to_owned(),
        ));
    }

    let (i1, i2, i3) = (i[(0, 0)], i[(1, 1)], i[(2, 2)]);
    let (w1, w2, w3) = (w[0], w[1], w[2]);

    let a1 = (w2 * w3 * (i2 - i3) + m[0]) / i1;
    let a2 = (w3 * w1 * (i3 - i1) + m[1]) / i2;
    let a3 = (w1 * w2 * (i1 - i2) + m[2]) / i3;

    Ok(Quantity::vector3(a1, a2, a3, si::PER_SECOND2))
}

/// A direct orthonormal basis whose third axis points along `z`.
///
/// `z` already on the vertical axis short-circuits to the identity (or a
/// flipped identity when pointing down); otherwise the first axis is
/// built perpendicular to both `z` and the vertical.
pub fn basis_from_z(z: &Quantity) -> Result<Basis> {
    let v = z.magnitude.as_vector()?;
    if v.len() != 3 {
        return Err(Error::shape(format!(
            "{}-dimensional axis, 3 requested",
            v.len()
        )));
    }

    if v[0] == 0.0 && v[1] == 0.0 {
        if v[2] >= 0.0 {
            return Ok(Basis::identity());
        }
        let columns = [
            DVector::from_column_slice(&[0.0, 1.0, 0.0]),
            DVector::from_column_slice(&[1.0, 0.0, 0.0]),
            DVector::from_column_slice(&[0.0, 0.0, -1.0]),
        ];
        return Basis::new(DMatrix::from_columns(&columns));
    }

    let z_axis = v / v.norm();
    let x = z_axis.cross(&DVector::from_column_slice(&[0.0, 0.0, 1.0]));
    let x_axis = &x / x.norm();
    let y_axis = z_axis.cross(&x_axis);
    Basis::new(DMatrix::from_columns(&[x_axis, y_axis, z_axis]))
}
