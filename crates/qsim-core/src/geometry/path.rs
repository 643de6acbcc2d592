//! Polylines of position quantities.

use std::f64::consts::PI;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quantity::{Quantity, Storage};
use crate::units::si;

/// An ordered, append-only sequence of positions sharing one
/// dimensionality, connected into a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Storage<DVector<f64>>,
    dimension: usize,
}

impl Path {
    /// Build a path from ordered position quantities.
    pub fn from_points(points: &[Quantity]) -> Result<Self> {
        let first = points.first().ok_or(Error::EmptyArguments)?;
        let dimension = first.magnitude.as_vector()?.len();
        let mut storage = Storage::with_unit(si::METRE);
        for point in points {
            if point.magnitude.as_vector()?.len() != dimension {
                return Err(Error::shape(format!(
                    "point of size {} in a {dimension}-dimensional path",
                    point.len()
                )));
            }
            storage.push(point.clone())?;
        }
        Ok(Self {
            points: storage,
            dimension,
        })
    }

    /// Adopt an existing storage of metre vectors.
    pub fn from_storage(points: Storage<DVector<f64>>) -> Result<Self> {
        match points.unit() {
            Some(unit) if unit == si::METRE => {}
            other => {
                return Err(Error::UnitMismatch {
                    left: other.map(|u| u.to_string()).unwrap_or_default(),
                    right: si::METRE.to_string(),
                })
            }
        }
        let dimension = points.iter().next().map(|p| p.len()).unwrap_or(0);
        for point in points.iter() {
            if point.len() != dimension {
                return Err(Error::shape(format!(
                    "point of size {} in a {dimension}-dimensional path",
                    point.len()
                )));
            }
        }
        Ok(Self { points, dimension })
    }

    /// Append a position to the end of the path.
    pub fn push(&mut self, point: Quantity) -> Result<()> {
        if point.magnitude.as_vector()?.len() != self.dimension {
            return Err(Error::shape(format!(
                "point of size {} in a {}-dimensional path",
                point.len(),
                self.dimension
            )));
        }
        self.points.push(point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of coordinates per point.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, index: usize) -> Option<Quantity> {
        self.points.get(index)
    }

    /// Sum of the segment lengths; zero for a single point.
    pub fn length(&self) -> Result<Quantity> {
        if self.len() <= 1 {
            return Ok(Quantity::scalar(0.0, si::METRE));
        }
        let mut segments = Vec::with_capacity(self.len() - 1);
        for i in 0..self.len() - 1 {
            let a = self.points.quantity(i)?;
            let b = self.points.quantity(i + 1)?;
            segments.push(b.sub(&a)?.norm()?);
        }
        Quantity::sum(&segments)
    }
}

/// The closed path of a regular `n`-gon of radius `r` on the (O, x, y)
/// plane. The first point is repeated at the end.
pub fn regular_polygon(n: usize, radius: &Quantity) -> Result<Path> {
    radius.expect_unit(si::METRE)?;
    let r = radius.magnitude.as_scalar()?;
    let mut points = Vec::with_capacity(n + 1);
    for i in 0..n {
        let angle = 2.0 * PI * (i as f64 / n as f64);
        points.push(Quantity::vector3(
            r * angle.cos(),
            r * angle.sin(),
            0.0,
            si::METRE,
        ));
    }
    let first = points.first().ok_or(Error::EmptyArguments)?.clone();
    points.push(first);
    Path::from_points(&points)
}

/// Refine a path so consecutive points are at most `spacing` apart.
///
/// Segments longer than `spacing` are split linearly; the source path is
/// left untouched.
pub fn subdivide(spacing: &Quantity, path: &Path) -> Result<Path> {
    spacing.expect_unit(si::METRE)?;
    if path.is_empty() {
        return Err(Error::EmptyArguments);
    }
    let mut points = Vec::new();
    for i in 0..path.len() - 1 {
        let a = path.points.quantity(i)?;
        let b = path.points.quantity(i + 1)?;
        let distance = a.sub(&b)?.norm()?;
        if distance.compare(spacing)? != std::cmp::Ordering::Greater {
            points.push(a);
        } else {
            let splits = (distance.magnitude.as_scalar()? / spacing.magnitude.as_scalar()?)
                .floor() as usize;
            for k in 0..splits {
                let t = k as f64 / splits as f64;
                points.push(a.scale(1.0 - t).add(&b.scale(t))?);
            }
        }
    }
    points.push(path.points.quantity(path.len() - 1)?);
    Path::from_points(&points)
}
