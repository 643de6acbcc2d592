//! Trilinear interpolation of sampled cuboid fields.

use crate::error::{Error, Result};
use crate::field::Field;
use crate::geometry::Geometry;
use crate::quantity::{Quantity, StorageElement};

impl<M: StorageElement> Field<M> {
    /// A continuous function interpolating the samples of time slice `t`.
    ///
    /// Only cuboid-topology grids are supported. The query point is
    /// transformed into the field frame and must lie within the sampled
    /// half-extent on every axis. The value is the weighted sum of the
    /// 8 surrounding node samples, each weight the product of per-axis
    /// linear factors normalized by spacing³; a query exactly on a node
    /// reproduces the stored sample.
    pub fn continuous_approximation(
        &self,
        t: usize,
    ) -> Result<impl Fn(&Quantity) -> Result<Quantity> + '_> {
        if self.region().geometry() != Geometry::Cuboid {
            return Err(Error::UnsupportedFieldShape {
                geometry: self.region().geometry().to_string(),
            });
        }

        Ok(move |r: &Quantity| {
            let local = self.reference_frame().inside(r)?;
            let local = local.magnitude.as_vector()?.clone();
            let spacing = self.spacing().magnitude.as_scalar()?;
            let shape = self.shape();

            for axis in 0..3 {
                if local[axis].abs() > spacing * (shape[axis] as f64 - 1.0) / 2.0 {
                    return Err(Error::OutsideSampledRegion);
                }
            }

            // Enclosing cell, clamping the upper edge down so all eight
            // corners stay addressable.
            let mut cell = [0usize; 3];
            for axis in 0..3 {
                let base = (shape[axis] - 1) / 2;
                let mut index = (base as i64 + (local[axis] / spacing).trunc() as i64) as usize;
                if index == shape[axis] - 1 && index > 0 {
                    index -= 1;
                }
                cell[axis] = index;
            }

            // Distances to the lower cell face and its complement; each
            // pair sums to the spacing.
            let mut distances = [[0.0f64; 2]; 3];
            for axis in 0..3 {
                let node = spacing * (cell[axis] as f64 - (shape[axis] as f64 - 1.0) / 2.0);
                distances[axis][0] = local[axis] - node;
                distances[axis][1] = spacing - distances[axis][0];
            }

            let total = spacing.powi(3);
            let mut corners = Vec::with_capacity(8);
            for c in 0..2 {
                for b in 0..2 {
                    for a in 0..2 {
                        let sample = self.value(cell[0] + a, cell[1] + b, cell[2] + c, t)?;
                        let weight =
                            distances[0][1 - a] * distances[1][1 - b] * distances[2][1 - c] / total;
                        corners.push(sample.scale(weight));
                    }
                }
            }
            Quantity::sum(&corners)
        })
    }
}
