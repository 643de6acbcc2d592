//! Explicit-Euler rigid-body trajectory integration.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::{DMatrix, DVector};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frames::{Basis, Configuration};
use crate::geometry::Path;
use crate::math;
use crate::quantity::{Quantity, Storage};
use crate::units::si;

use super::{euler_rotation, Solid};

/// A force or torque law: evaluated at (time, solid, velocity, angular
/// velocity), returns a force in N or a torque in N·m.
pub type ForceLaw = Box<dyn Fn(&Quantity, &Solid, &Quantity, &Quantity) -> Result<Quantity>>;

/// Per-channel, append-only record of an integration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryData {
    pub times: Storage<f64>,
    pub positions: Storage<DVector<f64>>,
    pub forces: Storage<DVector<f64>>,
    pub torques: Storage<DVector<f64>>,
    pub velocities: Storage<DVector<f64>>,
    pub accelerations: Storage<DVector<f64>>,
    pub angular_velocities: Storage<DVector<f64>>,
    pub angular_accelerations: Storage<DVector<f64>>,
    pub orientations_b_to_e: Storage<DMatrix<f64>>,
    pub orientations_e_to_b: Storage<DMatrix<f64>>,
}

impl Default for TrajectoryData {
    fn default() -> Self {
        Self {
            times: Storage::with_unit(si::SECOND),
            positions: Storage::with_unit(si::METRE),
            forces: Storage::with_unit(si::NEWTON),
            torques: Storage::with_unit(si::NEWTON_METRE),
            velocities: Storage::with_unit(si::METRE_PER_SECOND),
            accelerations: Storage::with_unit(si::METRE_PER_SECOND2),
            angular_velocities: Storage::with_unit(si::PER_SECOND),
            angular_accelerations: Storage::with_unit(si::PER_SECOND2),
            orientations_b_to_e: Storage::with_unit(si::DIMENSIONLESS),
            orientations_e_to_b: Storage::with_unit(si::DIMENSIONLESS),
        }
    }
}

impl TrajectoryData {
    /// Number of committed steps.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// One computed but not yet committed step.
#[derive(Debug, Clone)]
struct PendingStep {
    time: Quantity,
    force: Quantity,
    torque: Quantity,
    acceleration: Quantity,
    angular_acceleration: Quantity,
    velocity: Quantity,
    angular_velocity: Quantity,
    position: Quantity,
    orientation_b_to_e: DMatrix<f64>,
    orientation_e_to_b: DMatrix<f64>,
}

/// The integrator's persistent state between steps.
#[derive(Debug, Clone)]
struct MotionState {
    time: Quantity,
    velocity: Quantity,
    angular_velocity: Quantity,
}

/// Integrates the motion of one [`Solid`] under caller-supplied force
/// and torque laws.
///
/// Stepping follows a strict two-phase protocol: [`Trajectory::calculate`]
/// computes a step and parks it, [`Trajectory::save`] commits it to the
/// data channels and moves the solid. Splitting the step lets several
/// coupled trajectories all `calculate` against the same committed world
/// state before any of them `save`s, so N-body force laws see a
/// synchronized time slice.
pub struct Trajectory {
    solid: Rc<RefCell<Solid>>,
    data: TrajectoryData,
    initial_velocity: Quantity,
    initial_angular_velocity: Quantity,
    force: ForceLaw,
    torque: ForceLaw,
    state: Option<MotionState>,
    pending: Option<PendingStep>,
}

/// The zero force law.
fn zero_force(_: &Quantity, _: &Solid, _: &Quantity, _: &Quantity) -> Result<Quantity> {
    Ok(Quantity::vector3(0.0, 0.0, 0.0, si::NEWTON))
}

/// The zero torque law.
fn zero_torque(_: &Quantity, _: &Solid, _: &Quantity, _: &Quantity) -> Result<Quantity> {
    Ok(Quantity::vector3(0.0, 0.0, 0.0, si::NEWTON_METRE))
}

impl Trajectory {
    /// A trajectory for `solid`, at rest, with zero force and torque laws.
    pub fn new(solid: Rc<RefCell<Solid>>) -> Self {
        Self {
            solid,
            data: TrajectoryData::default(),
            initial_velocity: Quantity::vector3(0.0, 0.0, 0.0, si::METRE_PER_SECOND),
            initial_angular_velocity: Quantity::vector3(0.0, 0.0, 0.0, si::PER_SECOND),
            force: Box::new(zero_force),
            torque: Box::new(zero_torque),
            state: None,
            pending: None,
        }
    }

    /// Rebuild a trajectory around previously committed data, resuming
    /// the integrator state from the last committed step. Force and
    /// torque laws are not part of the data and reset to zero.
    pub fn from_parts(solid: Rc<RefCell<Solid>>, data: TrajectoryData) -> Self {
        let state = match (
            data.times.last(),
            data.velocities.last(),
            data.angular_velocities.last(),
        ) {
            (Some(time), Some(velocity), Some(angular_velocity)) => Some(MotionState {
                time,
                velocity,
                angular_velocity,
            }),
            _ => None,
        };
        Self {
            solid,
            data,
            initial_velocity: Quantity::vector3(0.0, 0.0, 0.0, si::METRE_PER_SECOND),
            initial_angular_velocity: Quantity::vector3(0.0, 0.0, 0.0, si::PER_SECOND),
            force: Box::new(zero_force),
            torque: Box::new(zero_torque),
            state,
            pending: None,
        }
    }

    pub fn set_force<F>(&mut self, law: F)
    where
        F: Fn(&Quantity, &Solid, &Quantity, &Quantity) -> Result<Quantity> + 'static,
    {
        self.force = Box::new(law);
    }

    pub fn set_torque<F>(&mut self, law: F)
    where
        F: Fn(&Quantity, &Solid, &Quantity, &Quantity) -> Result<Quantity> + 'static,
    {
        self.torque = Box::new(law);
    }

    pub fn set_initial_velocity(&mut self, velocity: Quantity) -> Result<()> {
        velocity.expect_unit(si::METRE_PER_SECOND)?;
        velocity.magnitude.as_vector()?;
        self.initial_velocity = velocity;
        Ok(())
    }

    pub fn set_initial_angular_velocity(&mut self, angular_velocity: Quantity) -> Result<()> {
        angular_velocity.expect_unit(si::PER_SECOND)?;
        angular_velocity.magnitude.as_vector()?;
        self.initial_angular_velocity = angular_velocity;
        Ok(())
    }

    /// The shared solid handle.
    pub fn solid(&self) -> &Rc<RefCell<Solid>> {
        &self.solid
    }

    /// The committed channels.
    pub fn data(&self) -> &TrajectoryData {
        &self.data
    }

    /// Number of committed steps.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Compute one step of length `dt` without committing it.
    ///
    /// Fails with [`Error::StepPending`] if the previous step has not
    /// been saved. The first call seeds the integrator: the inertia
    /// tensor is computed, time starts at −dt, and the configured
    /// initial velocities apply.
    pub fn calculate(&mut self, dt: &Quantity) -> Result<()> {
        dt.expect_unit(si::SECOND)?;
        if self.pending.is_some() {
            return Err(Error::StepPending);
        }

        let state = match &self.state {
            Some(state) => state.clone(),
            None => {
                self.solid.borrow().inertia_tensor()?;
                MotionState {
                    time: -dt.clone(),
                    velocity: self.initial_velocity.clone(),
                    angular_velocity: self.initial_angular_velocity.clone(),
                }
            }
        };

        let solid = self.solid.borrow();
        let time = state.time.add(dt)?;

        // Force and torque at the new time.
        let force = (self.force)(&time, &solid, &state.velocity, &state.angular_velocity)?;
        force.expect_unit(si::NEWTON)?;
        let torque = (self.torque)(&time, &solid, &state.velocity, &state.angular_velocity)?;
        torque.expect_unit(si::NEWTON_METRE)?;

        // Linear motion, explicit Euler.
        let acceleration = force.div(solid.mass())?;
        let velocity = state.velocity.add(&dt.mul(&acceleration)?)?;

        // Rotational motion: torque into the body frame, Euler's
        // equations, angular acceleration back into the parent frame.
        let basis = solid.configuration().basis();
        let torque_body = basis.inside(&torque)?;
        let inertia = solid.inertia_tensor()?;
        let alpha_body = euler_rotation(&inertia, &torque_body, &state.angular_velocity)?;
        let angular_acceleration = basis.outside(&alpha_body)?;
        let angular_velocity = state
            .angular_velocity
            .add(&dt.mul(&angular_acceleration)?)?;

        // Position, explicit Euler with the updated velocity.
        let position = solid.configuration().position().add(&dt.mul(&velocity)?)?;

        // Orientation: incremental Rodrigues rotation composed onto the
        // current one; the reverse direction is inverted directly.
        let rotation = dt.mul(&angular_velocity)?.rotation()?;
        let orientation_b_to_e = rotation.magnitude.as_matrix()? * basis.matrix_b_to_e();
        let orientation_e_to_b = math::inverse(&orientation_b_to_e)?;

        drop(solid);
        self.state = Some(MotionState {
            time: time.clone(),
            velocity: velocity.clone(),
            angular_velocity: angular_velocity.clone(),
        });
        self.pending = Some(PendingStep {
            time,
            force,
            torque,
            acceleration,
            angular_acceleration,
            velocity,
            angular_velocity,
            position,
            orientation_b_to_e,
            orientation_e_to_b,
        });
        Ok(())
    }

    /// Commit the pending step: append every channel and move the solid
    /// to the just-computed pose.
    ///
    /// Fails with [`Error::NoStepPending`] if nothing was calculated.
    pub fn save(&mut self) -> Result<()> {
        let step = self.pending.take().ok_or(Error::NoStepPending)?;

        self.data.times.push(step.time)?;
        self.data.forces.push(step.force)?;
        self.data.torques.push(step.torque)?;
        self.data.accelerations.push(step.acceleration)?;
        self.data
            .angular_accelerations
            .push(step.angular_acceleration)?;
        self.data.velocities.push(step.velocity)?;
        self.data.angular_velocities.push(step.angular_velocity)?;
        self.data.positions.push(step.position.clone())?;
        self.data.orientations_b_to_e.push(Quantity::matrix(
            step.orientation_b_to_e.clone(),
            si::DIMENSIONLESS,
        )?)?;
        self.data.orientations_e_to_b.push(Quantity::matrix(
            step.orientation_e_to_b.clone(),
            si::DIMENSIONLESS,
        )?)?;

        let basis = Basis::with_inverse(step.orientation_b_to_e, step.orientation_e_to_b)?;
        let configuration = Configuration::new(step.position, basis)?;
        self.solid.borrow_mut().replace_configuration(configuration);
        Ok(())
    }

    /// Step through `interval` in increments of `dt`, committing every
    /// step.
    pub fn generate(&mut self, interval: &Quantity, dt: &Quantity) -> Result<()> {
        let steps = interval.div(dt)?.magnitude.as_scalar()? as usize;
        for _ in 0..steps {
            self.calculate(dt)?;
            self.save()?;
        }
        Ok(())
    }

    /// The committed positions as a polyline.
    pub fn path(&self) -> Result<Path> {
        Path::from_storage(self.data.positions.clone())
    }
}

impl Serialize for Trajectory {
    /// A trajectory serializes as its solid, channels and initial
    /// conditions; the force and torque laws are code and are not part
    /// of the representation.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let snapshot = TrajectorySnapshot {
            solid: self.solid.borrow().clone(),
            data: self.data.clone(),
            initial_velocity: self.initial_velocity.clone(),
            initial_angular_velocity: self.initial_angular_velocity.clone(),
        };
        snapshot.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Trajectory {
    /// Deserialization restores the channels and integrator state; the
    /// laws reset to zero and must be re-attached.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let snapshot = TrajectorySnapshot::deserialize(deserializer)?;
        let mut trajectory =
            Trajectory::from_parts(Rc::new(RefCell::new(snapshot.solid)), snapshot.data);
        trajectory.initial_velocity = snapshot.initial_velocity;
        trajectory.initial_angular_velocity = snapshot.initial_angular_velocity;
        Ok(trajectory)
    }
}

#[derive(Serialize, Deserialize)]
struct TrajectorySnapshot {
    solid: Solid,
    data: TrajectoryData,
    initial_velocity: Quantity,
    initial_angular_velocity: Quantity,
}
