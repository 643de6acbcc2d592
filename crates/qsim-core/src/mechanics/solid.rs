//! Rigid bodies.

use std::cell::RefCell;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frames::Configuration;
use crate::geometry::{Geometry, Path, Volume};
use crate::quantity::Quantity;
use crate::units::si;

/// The shape of a solid: a filled volume or a polyline (e.g. a wire loop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Volume(Volume),
    Path(Path),
}

/// A rigid body: a pose, a shape and its physical properties.
///
/// The inertia tensor is computed from shape and mass on first use and
/// cached; rebuilding the solid is the only way to clear it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solid {
    configuration: Configuration,
    shape: Shape,
    mass: Quantity,
    charge: Quantity,
    current: Quantity,
    magnetic_moment: Quantity,
    #[serde(skip)]
    inertia: RefCell<Option<Quantity>>,
}

impl Solid {
    /// A solid with default properties: 1 kg, no charge, no current, no
    /// magnetic moment.
    pub fn new(configuration: Configuration, shape: Shape) -> Self {
        Self {
            configuration,
            shape,
            mass: Quantity::scalar(1.0, si::KILOGRAM),
            charge: Quantity::scalar(0.0, si::COULOMB),
            current: Quantity::scalar(0.0, si::AMPERE),
            magnetic_moment: Quantity::vector3(0.0, 0.0, 0.0, si::AMPERE_METRE2),
            inertia: RefCell::new(None),
        }
    }

    pub fn with_mass(mut self, mass: Quantity) -> Result<Self> {
        mass.expect_unit(si::KILOGRAM)?;
        mass.magnitude.as_scalar()?;
        self.mass = mass;
        Ok(self)
    }

    pub fn with_charge(mut self, charge: Quantity) -> Result<Self> {
        charge.expect_unit(si::COULOMB)?;
        charge.magnitude.as_scalar()?;
        self.charge = charge;
        Ok(self)
    }

    pub fn with_current(mut self, current: Quantity) -> Result<Self> {
        current.expect_unit(si::AMPERE)?;
        current.magnitude.as_scalar()?;
        self.current = current;
        Ok(self)
    }

    pub fn with_magnetic_moment(mut self, moment: Quantity) -> Result<Self> {
        moment.expect_unit(si::AMPERE_METRE2)?;
        moment.magnitude.as_vector()?;
        self.magnetic_moment = moment;
        Ok(self)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Replace the pose wholesale (the trajectory integrator commits a
    /// step this way).
    pub fn replace_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn mass(&self) -> &Quantity {
        &self.mass
    }

    pub fn charge(&self) -> &Quantity {
        &self.charge
    }

    pub fn current(&self) -> &Quantity {
        &self.current
    }

    pub fn magnetic_moment(&self) -> &Quantity {
        &self.magnetic_moment
    }

    /// The inertia tensor in the body frame, kg·m², computed on first
    /// use and cached.
    ///
    /// Sphere: (2/5)·m·r²·I. Cylinder: diagonal with
    /// (3r² + 4h²)/12 in the plane and r²/2 along the axis. Cuboid:
    /// m/12·diag(y²+z², x²+z², x²+y²). A path has no volume to integrate
    /// over, so no tensor.
    pub fn inertia_tensor(&self) -> Result<Quantity> {
        if let Some(cached) = self.inertia.borrow().as_ref() {
            return Ok(cached.clone());
        }

        let volume = match &self.shape {
            Shape::Volume(volume) => volume,
            Shape::Path(_) => {
                return Err(Error::Unsupported {
                    reason: "no inertia tensor for a path-shaped solid".to_owned(),
                })
            }
        };
        let m = self.mass.magnitude.as_scalar()?;

        let diagonal = match volume.geometry() {
            Geometry::Sphere => {
                let r2 = volume.extent(0)?.powi(2);
                let k = 0.4 * m * r2;
                DVector::from_column_slice(&[k, k, k])
            }
            Geometry::Cylinder => {
                let r2 = volume.extent(0)?.powi(2);
                let h2 = volume.extent(1)?.powi(2);
                let k = m * (3.0 * r2 + 4.0 * h2) / 12.0;
                DVector::from_column_slice(&[k, k, m * r2 / 2.0])
            }
            Geometry::Cuboid => {
                let x2 = volume.extent(0)?.powi(2);
                let y2 = volume.extent(1)?.powi(2);
                let z2 = volume.extent(2)?.powi(2);
                DVector::from_column_slice(&[
                    m * (y2 + z2) / 12.0,
                    m * (x2 + z2) / 12.0,
                    m * (x2 + y2) / 12.0,
                ])
            }
        };

        let tensor = Quantity::matrix(DMatrix::from_diagonal(&diagonal), si::KILOGRAM_METRE2)?;
        *self.inertia.borrow_mut() = Some(tensor.clone());
        Ok(tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn metres(v: f64) -> Quantity {
        Quantity::scalar(v, si::METRE)
    }

    fn sphere_solid(radius: f64, mass: f64) -> Solid {
        let shape = Shape::Volume(Volume::sphere(metres(radius)).unwrap());
        Solid::new(Configuration::origin(), shape)
            .with_mass(Quantity::scalar(mass, si::KILOGRAM))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let solid = sphere_solid(1.0, 1.0);
        assert_eq!(solid.charge(), &Quantity::scalar(0.0, si::COULOMB));
        assert_eq!(solid.current(), &Quantity::scalar(0.0, si::AMPERE));
    }

    #[test]
    fn test_property_units_are_validated() {
        let solid = sphere_solid(1.0, 1.0);
        assert!(solid
            .clone()
            .with_mass(Quantity::scalar(1.0, si::METRE))
            .is_err());
        assert!(solid
            .with_magnetic_moment(Quantity::vector3(0.0, 0.0, 1.0, si::AMPERE))
            .is_err());
    }

    #[test]
    fn test_sphere_inertia_tensor() {
        let solid = sphere_solid(2.0, 5.0);
        let tensor = solid.inertia_tensor().unwrap();
        assert_eq!(tensor.unit, si::KILOGRAM_METRE2);

        let m = tensor.magnitude.as_matrix().unwrap();
        // (2/5)·5·4 = 8 on the diagonal.
        for i in 0..3 {
            assert_relative_eq!(m[(i, i)], 8.0, epsilon = 1e-12);
        }
        assert_relative_eq!(m[(0, 1)], 0.0);
    }

    #[test]
    fn test_cuboid_inertia_tensor() {
        let shape = Shape::Volume(Volume::cuboid(metres(1.0), metres(2.0), metres(3.0)).unwrap());
        let solid = Solid::new(Configuration::origin(), shape)
            .with_mass(Quantity::scalar(12.0, si::KILOGRAM))
            .unwrap();

        let tensor = solid.inertia_tensor().unwrap();
        let m = tensor.magnitude.as_matrix().unwrap();
        assert_relative_eq!(m[(0, 0)], 13.0, epsilon = 1e-12); // (4+9)
        assert_relative_eq!(m[(1, 1)], 10.0, epsilon = 1e-12); // (1+9)
        assert_relative_eq!(m[(2, 2)], 5.0, epsilon = 1e-12); // (1+4)
    }

    #[test]
    fn test_inertia_tensor_is_cached() {
        let solid = sphere_solid(1.0, 1.0);
        assert!(solid.inertia.borrow().is_none());
        solid.inertia_tensor().unwrap();
        assert!(solid.inertia.borrow().is_some());
    }

    #[test]
    fn test_path_shape_has_no_tensor() {
        let loop_path = crate::geometry::regular_polygon(8, &metres(1.0)).unwrap();
        let solid = Solid::new(Configuration::origin(), Shape::Path(loop_path));
        assert!(solid.inertia_tensor().is_err());
    }
}
