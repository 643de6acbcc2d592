//! Geometric regions classified by their size arguments.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quantity::Quantity;
use crate::units::si;

/// The shape class of a [`Volume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Geometry {
    Sphere,
    Cylinder,
    Cuboid,
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Sphere => f.write_str("sphere"),
            Geometry::Cylinder => f.write_str("cylinder"),
            Geometry::Cuboid => f.write_str("cuboid"),
        }
    }
}

/// A geometric region, classified by the number of its size arguments:
/// one length makes a sphere, two a cylinder, three a cuboid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    geometry: Geometry,
    size: Vec<Quantity>,
}

impl Volume {
    /// Classify a region from its ordered size arguments.
    pub fn from_sizes(sizes: &[Quantity]) -> Result<Self> {
        let geometry = match sizes.len() {
            1 => Geometry::Sphere,
            2 => Geometry::Cylinder,
            3 => Geometry::Cuboid,
            n => {
                return Err(Error::InvalidArgument {
                    reason: format!("{n} size arguments, 1 to 3 requested"),
                })
            }
        };
        for size in sizes {
            size.expect_unit(si::METRE)?;
            size.magnitude.as_scalar()?;
        }
        Ok(Self {
            geometry,
            size: sizes.to_vec(),
        })
    }

    pub fn sphere(radius: Quantity) -> Result<Self> {
        Self::from_sizes(&[radius])
    }

    pub fn cylinder(radius: Quantity, height: Quantity) -> Result<Self> {
        Self::from_sizes(&[radius, height])
    }

    pub fn cuboid(x: Quantity, y: Quantity, z: Quantity) -> Result<Self> {
        Self::from_sizes(&[x, y, z])
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The ordered size arguments, all in metres.
    pub fn size(&self) -> &[Quantity] {
        &self.size
    }

    /// The `i`-th size argument as a bare number of metres.
    pub(crate) fn extent(&self, i: usize) -> Result<f64> {
        self.size[i].magnitude.as_scalar()
    }

    /// The measure of the region, in cubic metres.
    pub fn measure(&self) -> Result<Quantity> {
        match self.geometry {
            Geometry::Sphere => Ok(self.size[0].powi(3)?.scale(4.0 / 3.0 * PI)),
            Geometry::Cylinder => Ok(self.size[0].powi(2)?.mul(&self.size[1])?.scale(PI)),
            Geometry::Cuboid => Quantity::product(&self.size),
        }
    }
}
