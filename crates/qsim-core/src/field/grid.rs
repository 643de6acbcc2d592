//! Structured-grid sampling of quantity-valued functions.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frames::{from_cylindrical, from_spherical, Configuration};
use crate::geometry::{Geometry, Volume};
use crate::quantity::{Quantity, Storage, StorageElement};
use crate::units::si;

/// A sampler of a quantity-valued function over a structured 3-D grid.
///
/// The grid shape is computed once from the region geometry and the
/// spacing at construction and never changes. Every call to
/// [`Field::sample`] appends exactly one time slice (nx·ny·nz samples)
/// and bumps the frame counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field<M> {
    region: Volume,
    spacing: Quantity,
    frame: Configuration,
    samples: Storage<M>,
    shape: [usize; 3],
    frame_count: usize,
}

impl<M: StorageElement> Field<M> {
    /// Lay a grid with the given spacing over `region`, positioned by
    /// `frame` inside the parent frame.
    pub fn new(region: Volume, spacing: Quantity, frame: Configuration) -> Result<Self> {
        spacing.expect_unit(si::METRE)?;
        let spg = spacing.magnitude.as_scalar()?;
        if spg <= 0.0 {
            return Err(Error::InvalidArgument {
                reason: "spacing must be positive".to_owned(),
            });
        }

        let shape = match region.geometry() {
            Geometry::Cuboid => [
                (region.extent(0)? / spg) as usize + 1,
                (region.extent(1)? / spg) as usize + 1,
                (region.extent(2)? / spg) as usize + 1,
            ],
            Geometry::Cylinder => [
                (region.extent(0)? / spg / 2.0) as usize,
                (region.extent(0)? / spg * PI / 2.0) as usize,
                (region.extent(1)? / spg) as usize + 1,
            ],
            Geometry::Sphere => [
                (region.extent(0)? / spg / 2.0) as usize,
                (region.extent(0)? / spg * PI / 4.0) as usize,
                (region.extent(0)? / spg * PI / 2.0) as usize,
            ],
        };

        Ok(Self {
            region,
            spacing,
            frame,
            samples: Storage::new(),
            shape,
            frame_count: 0,
        })
    }

    pub fn region(&self) -> &Volume {
        &self.region
    }

    pub fn spacing(&self) -> &Quantity {
        &self.spacing
    }

    pub fn reference_frame(&self) -> &Configuration {
        &self.frame
    }

    /// Grid node counts per structured axis.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Number of complete time slices sampled so far.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// The stored samples, one slice per frame in sampling order.
    pub fn samples(&self) -> &Storage<M> {
        &self.samples
    }

    /// Parent-frame position of grid node (i, j, k).
    ///
    /// Cuboid grids are centered on the frame origin; cylindrical and
    /// spherical grids convert their structured indices through the
    /// matching coordinate transform.
    pub fn position(&self, i: usize, j: usize, k: usize) -> Result<Quantity> {
        let [n0, n1, n2] = self.shape;
        match self.region.geometry() {
            Geometry::Cuboid => {
                let offset = Quantity::vector3(
                    i as f64 - (n0 as f64 - 1.0) / 2.0,
                    j as f64 - (n1 as f64 - 1.0) / 2.0,
                    k as f64 - (n2 as f64 - 1.0) / 2.0,
                    si::DIMENSIONLESS,
                );
                self.frame.outside(&self.spacing.mul(&offset)?)
            }
            Geometry::Cylinder => {
                let radius = self.spacing.scale(i as f64 + 1.0);
                let phi = Quantity::dimensionless(2.0 * PI * (j as f64 / n1 as f64));
                let height = self.spacing.scale(k as f64 - n2 as f64 / 2.0);
                self.frame
                    .outside(&from_cylindrical(&radius, &phi, &height)?)
            }
            Geometry::Sphere => {
                let radius = self.spacing.scale(i as f64 + 1.0);
                let theta = Quantity::dimensionless(PI * (j as f64 / n1 as f64));
                let phi = Quantity::dimensionless(2.0 * PI * (k as f64 / n2 as f64));
                self.frame.outside(&from_spherical(&radius, &theta, &phi)?)
            }
        }
    }

    /// Evaluate `f` at every grid node, in i-outer, j-middle, k-inner
    /// order, appending one complete time slice.
    pub fn sample<F>(&mut self, f: F) -> Result<()>
    where
        F: Fn(&Quantity) -> Result<Quantity>,
    {
        let [n0, n1, n2] = self.shape;
        for i in 0..n0 {
            for j in 0..n1 {
                for k in 0..n2 {
                    let value = f(&self.position(i, j, k)?)?;
                    self.samples.push(value)?;
                }
            }
        }
        self.frame_count += 1;
        Ok(())
    }

    /// The stored sample at grid node (i, j, k) of time slice `t`.
    pub fn value(&self, i: usize, j: usize, k: usize, t: usize) -> Result<Quantity> {
        let [n0, n1, n2] = self.shape;
        if i >= n0 || j >= n1 || k >= n2 || t >= self.frame_count {
            return Err(Error::shape(format!(
                "node ({i}, {j}, {k}) of frame {t} outside a {n0}x{n1}x{n2} grid with {} frames",
                self.frame_count
            )));
        }
        self.samples.quantity(k + n2 * (j + n1 * (i + n0 * t)))
    }
}
