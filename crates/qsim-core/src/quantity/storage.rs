//! Append-only storage of homogeneous quantity sequences.
//!
//! `Storage<M>` is parameterized by the magnitude kind it holds, so kind
//! homogeneity is settled at the type level; the shared unit is a runtime
//! value, adopted from the first push (or fixed at construction) and
//! checked on every subsequent push. Elements serialize as raw
//! magnitudes next to the single unit.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::Magnitude;
use crate::quantity::Quantity;
use crate::units::Unit;

/// A raw magnitude payload that can round-trip through [`Magnitude`].
pub trait StorageElement: Clone + PartialEq {
    fn into_magnitude(self) -> Magnitude;
    fn from_magnitude(magnitude: Magnitude) -> Result<Self>;
}

impl StorageElement for f64 {
    fn into_magnitude(self) -> Magnitude {
        Magnitude::Scalar(self)
    }

    fn from_magnitude(magnitude: Magnitude) -> Result<Self> {
        magnitude.as_scalar()
    }
}

impl StorageElement for DVector<f64> {
    fn into_magnitude(self) -> Magnitude {
        Magnitude::Vector(self)
    }

    fn from_magnitude(magnitude: Magnitude) -> Result<Self> {
        magnitude.as_vector().cloned()
    }
}

impl StorageElement for DMatrix<f64> {
    fn into_magnitude(self) -> Magnitude {
        Magnitude::Matrix(self)
    }

    fn from_magnitude(magnitude: Magnitude) -> Result<Self> {
        magnitude.as_matrix().cloned()
    }
}

/// An append-only sequence of quantities sharing one unit and one
/// magnitude kind. Nothing is ever removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage<M> {
    unit: Option<Unit>,
    data: Vec<M>,
}

impl<M: StorageElement> Storage<M> {
    /// An empty storage that adopts the unit of the first push.
    pub fn new() -> Self {
        Self {
            unit: None,
            data: Vec::new(),
        }
    }

    /// An empty storage with the unit fixed up front.
    pub fn with_unit(unit: Unit) -> Self {
        Self {
            unit: Some(unit),
            data: Vec::new(),
        }
    }

    /// The shared unit, once known.
    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a quantity, checking it against the stored unit.
    pub fn push(&mut self, quantity: Quantity) -> Result<()> {
        match self.unit {
            None => self.unit = Some(quantity.unit),
            Some(unit) => quantity.expect_unit(unit)?,
        }
        self.data.push(M::from_magnitude(quantity.magnitude)?);
        Ok(())
    }

    /// Rebuild the `index`-th quantity.
    pub fn get(&self, index: usize) -> Option<Quantity> {
        let unit = self.unit?;
        let element = self.data.get(index)?;
        Some(Quantity::new(element.clone().into_magnitude(), unit))
    }

    /// Rebuild the most recent quantity.
    pub fn last(&self) -> Option<Quantity> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// The raw stored magnitudes.
    pub fn elements(&self) -> &[M] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.data.iter()
    }

    /// Rebuild the `index`-th quantity, failing instead of returning
    /// `None` so callers can use `?`.
    pub fn quantity(&self, index: usize) -> Result<Quantity> {
        self.get(index).ok_or(Error::shape(format!(
            "index {index} out of {} stored quantities",
            self.len()
        )))
    }
}

impl<M: StorageElement> Default for Storage<M> {
    fn default() -> Self {
        Self::new()
    }
}
