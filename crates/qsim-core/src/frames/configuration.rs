//! Pose of a local frame inside a parent frame.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frames::Basis;
use crate::quantity::Quantity;
use crate::units::si;

/// A position and a basis: the pose of a body frame inside its parent.
///
/// Configurations are immutable snapshots; moving a body replaces its
/// configuration wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    position: Quantity,
    basis: Basis,
}

impl Configuration {
    /// Build a configuration from a metre-vector position and a basis.
    pub fn new(position: Quantity, basis: Basis) -> Result<Self> {
        position.expect_unit(si::METRE)?;
        position.magnitude.as_vector()?;
        Ok(Self { position, basis })
    }

    /// The identity pose: origin position, identity basis.
    pub fn origin() -> Self {
        Self {
            position: Quantity::vector3(0.0, 0.0, 0.0, si::METRE),
            basis: Basis::identity(),
        }
    }

    pub fn position(&self) -> &Quantity {
        &self.position
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Express `q` (parent frame) with respect to this configuration.
    pub fn inside(&self, q: &Quantity) -> Result<Quantity> {
        self.basis.inside(&q.sub(&self.position)?)
    }

    /// Express `q` (this frame) with respect to the parent frame.
    pub fn outside(&self, q: &Quantity) -> Result<Quantity> {
        self.basis.outside(q)?.add(&self.position)
    }
}
