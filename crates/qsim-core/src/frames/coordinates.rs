//! Spherical and cylindrical coordinate conversions.

use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::quantity::Quantity;
use crate::units::Unit;

/// Spherical coordinates of a 3-vector quantity:
/// (radial distance, polar angle θ, azimuthal angle φ).
///
/// At the origin both angles are zero; on the z-axis the azimuth is zero
/// and ±π/2 on the y half-planes, avoiding an undefined arctangent.
pub fn to_spherical(v: &Quantity) -> Result<[Quantity; 3]> {
    let m = v.magnitude.as_vector()?;
    if m.len() != 3 {
        return Err(Error::shape(format!(
            "{}-dimensional position, 3 requested",
            m.len()
        )));
    }

    let r = v.norm()?;
    if m.norm() == 0.0 {
        return Ok([r, Quantity::dimensionless(0.0), Quantity::dimensionless(0.0)]);
    }
    let theta = v.component(2)?.div(&r)?.acos()?;
    if m[0] == 0.0 {
        let phi = if m[1] > 0.0 {
            PI / 2.0
        } else if m[1] < 0.0 {
            -PI / 2.0
        } else {
            0.0
        };
        return Ok([r, theta, Quantity::dimensionless(phi)]);
    }
    let phi = v.component(1)?.div(&v.component(0)?)?.atan()?;
    Ok([r, theta, phi])
}

/// Cartesian position from spherical coordinates.
///
/// Requires r ≥ 0, θ ∈ [0, π] and φ ∈ [0, 2π]; the angles must be
/// dimensionless. The result carries the unit of `r`.
pub fn from_spherical(r: &Quantity, theta: &Quantity, phi: &Quantity) -> Result<Quantity> {
    let radius = r.magnitude.as_scalar()?;
    if radius < 0.0 {
        return Err(Error::InvalidArgument {
            reason: "'r' < 0".to_owned(),
        });
    }
    let t = theta.magnitude.as_scalar()?;
    if !(0.0..=PI).contains(&t) {
        return Err(Error::InvalidArgument {
            reason: "'theta' < 0 or 'theta' > pi".to_owned(),
        });
    }
    let p = phi.magnitude.as_scalar()?;
    if !(0.0..=2.0 * PI).contains(&p) {
        return Err(Error::InvalidArgument {
            reason: "'phi' < 0 or 'phi' > 2*pi".to_owned(),
        });
    }

    let x = Quantity::product(&[r.clone(), theta.sin()?, phi.cos()?])?;
    let y = Quantity::product(&[r.clone(), theta.sin()?, phi.sin()?])?;
    let z = r.mul(&theta.cos()?)?;
    Ok(Quantity::vector3(
        x.magnitude.as_scalar()?,
        y.magnitude.as_scalar()?,
        z.magnitude.as_scalar()?,
        x.unit,
    ))
}

/// Cylindrical coordinates of a 3-vector quantity:
/// (radial distance, angular coordinate φ, height z).
pub fn to_cylindrical(v: &Quantity) -> Result<[Quantity; 3]> {
    let m = v.magnitude.as_vector()?;
    if m.len() != 3 {
        return Err(Error::shape(format!(
            "{}-dimensional position, 3 requested",
            m.len()
        )));
    }

    let r = v
        .component(0)?
        .powi(2)?
        .add(&v.component(1)?.powi(2)?)?
        .powf(0.5)?;
    let z = v.component(2)?;
    if m[0] == 0.0 {
        let phi = if m[1] > 0.0 {
            PI / 2.0
        } else if m[1] < 0.0 {
            -PI / 2.0
        } else {
            0.0
        };
        return Ok([r, Quantity::dimensionless(phi), z]);
    }
    let phi = v.component(1)?.div(&v.component(0)?)?.atan()?;
    Ok([r, phi, z])
}

/// Cartesian position from cylindrical coordinates.
///
/// Requires r ≥ 0 and φ ∈ [0, 2π]; `r` and `z` must share a unit, which
/// the result carries.
pub fn from_cylindrical(r: &Quantity, phi: &Quantity, z: &Quantity) -> Result<Quantity> {
    let radius = r.magnitude.as_scalar()?;
    if radius < 0.0 {
        return Err(Error::InvalidArgument {
            reason: "r < 0".to_owned(),
        });
    }
    let p = phi.magnitude.as_scalar()?;
    if !(0.0..=2.0 * PI).contains(&p) {
        return Err(Error::InvalidArgument {
            reason: "phi < 0 or phi > 2*pi".to_owned(),
        });
    }
    let unit = Unit::common(&[r.unit, z.unit])?;

    let x = r.mul(&phi.cos()?)?;
    let y = r.mul(&phi.sin()?)?;
    Ok(Quantity::vector3(
        x.magnitude.as_scalar()?,
        y.magnitude.as_scalar()?,
        z.magnitude.as_scalar()?,
        unit,
    ))
}
