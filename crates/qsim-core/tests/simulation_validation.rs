//! End-to-end validation of the simulation core.
//!
//! These tests exercise the documented properties across module
//! boundaries: unit-algebra round trips, linear-algebra contracts,
//! field sampling and interpolation, and rigid-body integration with
//! the two-phase stepping protocol.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use nalgebra::{dmatrix, DMatrix, DVector};

use qsim_core::field::Field;
use qsim_core::frames::Configuration;
use qsim_core::geometry::Volume;
use qsim_core::mechanics::{Shape, Solid, Trajectory};
use qsim_core::quantity::{self, Value};
use qsim_core::units::si;
use qsim_core::{Error, Quantity, Unit};

fn metres(v: f64) -> Quantity {
    Quantity::scalar(v, si::METRE)
}

fn seconds(v: f64) -> Quantity {
    Quantity::scalar(v, si::SECOND)
}

mod unit_algebra {
    use super::*;

    #[test]
    fn test_product_quotient_round_trip() {
        for (left, right) in [("m", "s"), ("N.m", "A"), ("kg.m-3", "C.m-2"), ("J", "K")] {
            let a = Unit::parse(left).unwrap();
            let b = Unit::parse(right).unwrap();
            assert_eq!(a * b / b, a, "round trip failed for {left} and {right}");
        }
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        // kg·m·s⁻² canonicalizes to the newton and stays there.
        let unit = Unit::parse("kg.m.s-2").unwrap();
        assert_eq!(unit.to_string(), "N");

        let mut text = unit.to_string();
        for _ in 0..3 {
            let reparsed = Unit::parse(&text).unwrap();
            assert_eq!(reparsed, unit);
            let rendered = reparsed.to_string();
            assert_eq!(rendered, text);
            text = rendered;
        }
    }
}

mod linear_algebra {
    use super::*;

    #[test]
    fn test_inverse_against_identity() {
        let m = Quantity::matrix(
            dmatrix![
                2.0, 1.0, 0.0;
                1.0, 3.0, 1.0;
                0.0, 1.0, 4.0
            ],
            si::DIMENSIONLESS,
        )
        .unwrap();

        let inv = m.inverse().unwrap();
        let product = m.mul(&inv).unwrap();
        assert_relative_eq!(
            product.magnitude.as_matrix().unwrap(),
            &DMatrix::identity(3, 3),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_singular_matrix_is_rejected() {
        let m = Quantity::matrix(
            dmatrix![
                1.0, 2.0, 3.0;
                2.0, 4.0, 6.0;
                0.0, 1.0, 1.0
            ],
            si::DIMENSIONLESS,
        )
        .unwrap();
        assert!(matches!(m.inverse(), Err(Error::SingularMatrix)));
    }

    #[test]
    fn test_rotation_matrices_are_orthogonal() {
        for v in [[0.1, 0.0, 0.0], [1.0, -2.0, 0.5], [0.0, 3.1, -0.4]] {
            let rotation = Quantity::vector3(v[0], v[1], v[2], si::DIMENSIONLESS)
                .rotation()
                .unwrap();
            let r = rotation.magnitude.as_matrix().unwrap();
            assert_relative_eq!(r * r.transpose(), DMatrix::identity(3, 3), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_rotation_vector_is_exact_identity() {
        let rotation = Quantity::vector3(0.0, 0.0, 0.0, si::DIMENSIONLESS)
            .rotation()
            .unwrap();
        assert_eq!(
            rotation.magnitude.as_matrix().unwrap(),
            &DMatrix::identity(3, 3)
        );
    }
}

mod field_sampling {
    use super::*;

    #[test]
    fn test_unit_cuboid_grid_shape() {
        let region = Volume::cuboid(metres(1.0), metres(1.0), metres(1.0)).unwrap();
        let field: Field<DVector<f64>> =
            Field::new(region, metres(0.5), Configuration::origin()).unwrap();
        assert_eq!(field.shape(), [3, 3, 3]);
    }

    #[test]
    fn test_constant_field_interpolates_exactly_at_center() {
        let region = Volume::cuboid(metres(1.0), metres(1.0), metres(1.0)).unwrap();
        let mut field: Field<DVector<f64>> =
            Field::new(region, metres(0.5), Configuration::origin()).unwrap();

        let constant = Quantity::vector3(0.0, 0.0, 1.5, si::TESLA);
        field.sample(|_| Ok(constant.clone())).unwrap();

        let interpolate = field.continuous_approximation(0).unwrap();
        let center = Quantity::vector3(0.0, 0.0, 0.0, si::METRE);
        assert_eq!(interpolate(&center).unwrap(), constant);
    }

    #[test]
    fn test_interpolation_is_exact_at_every_grid_node() {
        let region = Volume::cuboid(metres(2.0), metres(2.0), metres(2.0)).unwrap();
        let mut field: Field<DVector<f64>> =
            Field::new(region, metres(1.0), Configuration::origin()).unwrap();
        field.sample(|r| Ok(r.clone())).unwrap();

        let interpolate = field.continuous_approximation(0).unwrap();
        let [n0, n1, n2] = field.shape();
        for i in 0..n0 {
            for j in 0..n1 {
                for k in 0..n2 {
                    let node = field.position(i, j, k).unwrap();
                    let stored = field.value(i, j, k, 0).unwrap();
                    let value = interpolate(&node).unwrap();
                    let got = value.magnitude.as_vector().unwrap();
                    let want = stored.magnitude.as_vector().unwrap();
                    for axis in 0..3 {
                        assert_relative_eq!(got[axis], want[axis], epsilon = 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_query_fails() {
        let region = Volume::cuboid(metres(1.0), metres(1.0), metres(1.0)).unwrap();
        let mut field: Field<f64> =
            Field::new(region, metres(0.5), Configuration::origin()).unwrap();
        field.sample(|_| Ok(Quantity::scalar(1.0, si::TESLA))).unwrap();

        let interpolate = field.continuous_approximation(0).unwrap();
        let outside = Quantity::vector3(0.0, -0.8, 0.0, si::METRE);
        assert!(matches!(
            interpolate(&outside),
            Err(Error::OutsideSampledRegion)
        ));
    }

    #[test]
    fn test_sampled_time_slices_are_independent() {
        let region = Volume::cuboid(metres(1.0), metres(1.0), metres(1.0)).unwrap();
        let mut field: Field<f64> =
            Field::new(region, metres(0.5), Configuration::origin()).unwrap();

        field.sample(|_| Ok(Quantity::scalar(1.0, si::TESLA))).unwrap();
        field.sample(|_| Ok(Quantity::scalar(2.0, si::TESLA))).unwrap();

        assert_eq!(field.frame_count(), 2);
        assert_eq!(
            field.value(1, 1, 1, 0).unwrap(),
            Quantity::scalar(1.0, si::TESLA)
        );
        assert_eq!(
            field.value(1, 1, 1, 1).unwrap(),
            Quantity::scalar(2.0, si::TESLA)
        );
    }
}

mod rigid_body {
    use super::*;

    fn solid_at_rest() -> Rc<RefCell<Solid>> {
        let shape = Shape::Volume(Volume::sphere(metres(1.0)).unwrap());
        Rc::new(RefCell::new(
            Solid::new(Configuration::origin(), shape)
                .with_mass(Quantity::scalar(1.0, si::KILOGRAM))
                .unwrap(),
        ))
    }

    #[test]
    fn test_ten_steps_of_force_free_drift() {
        // 1 kg body, v = (1, 0, 0) m/s, zero force and torque, ten
        // 1-second steps: the solid ends at (10, 0, 0) m with identity
        // orientation.
        let solid = solid_at_rest();
        let mut trajectory = Trajectory::new(solid.clone());
        trajectory
            .set_initial_velocity(Quantity::vector3(1.0, 0.0, 0.0, si::METRE_PER_SECOND))
            .unwrap();

        for _ in 0..10 {
            trajectory.calculate(&seconds(1.0)).unwrap();
            trajectory.save().unwrap();
        }

        let solid = solid.borrow();
        let p = solid.configuration().position().clone();
        assert_eq!(p, Quantity::vector3(10.0, 0.0, 0.0, si::METRE));
        assert_eq!(
            solid.configuration().basis().matrix_b_to_e(),
            &DMatrix::identity(3, 3)
        );
    }

    #[test]
    fn test_position_growth_is_strictly_linear() {
        let solid = solid_at_rest();
        let mut trajectory = Trajectory::new(solid);
        trajectory
            .set_initial_velocity(Quantity::vector3(0.0, 2.0, 0.0, si::METRE_PER_SECOND))
            .unwrap();
        trajectory.generate(&seconds(5.0), &seconds(1.0)).unwrap();

        let data = trajectory.data();
        for i in 0..data.len() {
            let t = data.times.get(i).unwrap().magnitude.as_scalar().unwrap();
            let p = data.positions.get(i).unwrap();
            let y = p.magnitude.as_vector().unwrap()[1];
            // Committed positions follow p(t) = (t + dt)·v.
            assert_relative_eq!(y, (t + 1.0) * 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_protocol_violations() {
        let mut trajectory = Trajectory::new(solid_at_rest());

        assert!(matches!(trajectory.save(), Err(Error::NoStepPending)));

        trajectory.calculate(&seconds(1.0)).unwrap();
        assert!(matches!(
            trajectory.calculate(&seconds(1.0)),
            Err(Error::StepPending)
        ));

        trajectory.save().unwrap();
        assert!(matches!(trajectory.save(), Err(Error::NoStepPending)));
    }

    #[test]
    fn test_two_body_synchronized_stepping() {
        // Both bodies calculate against the same committed time slice
        // before either saves; the spring force each law reads is the
        // other body's *uncommitted* position.
        let shape = Shape::Volume(Volume::sphere(metres(0.1)).unwrap());
        let left = Rc::new(RefCell::new(Solid::new(
            Configuration::new(
                Quantity::vector3(-1.0, 0.0, 0.0, si::METRE),
                qsim_core::frames::Basis::identity(),
            )
            .unwrap(),
            shape.clone(),
        )));
        let right = Rc::new(RefCell::new(Solid::new(
            Configuration::new(
                Quantity::vector3(1.0, 0.0, 0.0, si::METRE),
                qsim_core::frames::Basis::identity(),
            )
            .unwrap(),
            shape,
        )));

        let stiffness = Quantity::scalar(1.0, Unit::parse("N.m-1").unwrap());

        let mut left_trajectory = Trajectory::new(left.clone());
        let other = right.clone();
        let k = stiffness.clone();
        left_trajectory.set_force(move |_, solid, _, _| {
            let offset = other
                .borrow()
                .configuration()
                .position()
                .sub(solid.configuration().position())?;
            k.mul(&offset)
        });

        let mut right_trajectory = Trajectory::new(right.clone());
        let other = left.clone();
        let k = stiffness;
        right_trajectory.set_force(move |_, solid, _, _| {
            let offset = other
                .borrow()
                .configuration()
                .position()
                .sub(solid.configuration().position())?;
            k.mul(&offset)
        });

        let dt = seconds(0.01);
        for _ in 0..100 {
            // All calculate before any save.
            left_trajectory.calculate(&dt).unwrap();
            right_trajectory.calculate(&dt).unwrap();
            left_trajectory.save().unwrap();
            right_trajectory.save().unwrap();
        }

        // The attraction is symmetric, so the center of mass stays put.
        let lp = left.borrow().configuration().position().clone();
        let rp = right.borrow().configuration().position().clone();
        let center = lp.add(&rp).unwrap();
        let c = center.magnitude.as_vector().unwrap();
        assert_relative_eq!(c[0], 0.0, epsilon = 1e-9);

        // And the bodies have moved toward each other.
        let l = lp.magnitude.as_vector().unwrap();
        assert!(l[0] > -1.0);
    }

    #[test]
    fn test_zero_force_laws_keep_a_resting_body_still() {
        let solid = solid_at_rest();
        let mut trajectory = Trajectory::new(solid.clone());
        trajectory.generate(&seconds(2.0), &seconds(0.5)).unwrap();

        let p = solid.borrow().configuration().position().clone();
        assert_eq!(p, Quantity::vector3(0.0, 0.0, 0.0, si::METRE));
    }
}

mod lifted_operators {
    use super::*;

    #[test]
    fn test_time_varying_force_through_the_lifting_layer() {
        // Assemble F(t) = (sin(t/1s)·1N, 0, 0) with the lifted operators
        // and drive a trajectory with it.
        let newton = Quantity::scalar(1.0, si::NEWTON);
        let hertz = Quantity::scalar(1.0, si::PER_SECOND);
        let f = Value::function(move |t: &Quantity| {
            let phase = hertz.mul(t)?;
            newton.mul(&phase.sin()?)
        });

        let shape = Shape::Volume(Volume::sphere(metres(1.0)).unwrap());
        let solid = Rc::new(RefCell::new(Solid::new(Configuration::origin(), shape)));
        let mut trajectory = Trajectory::new(solid);

        let fx = f.clone();
        trajectory.set_force(move |t, _, _, _| {
            let x = fx.eval(t)?;
            quantity::vec_of(&[x.into(), 0.0.into(), 0.0.into()])?.into_constant()
        });

        trajectory.generate(&seconds(1.0), &seconds(0.1)).unwrap();
        assert_eq!(trajectory.len(), 10);

        // The velocity approximates ∫ sin = 1 − cos(t).
        let v = trajectory.data().velocities.last().unwrap();
        let vx = v.magnitude.as_vector().unwrap()[0];
        assert_relative_eq!(vx, 1.0 - 1.0f64.cos(), epsilon = 0.1);
    }
}

mod persistence {
    use super::*;

    #[test]
    fn test_field_session_round_trip() {
        let region = Volume::cuboid(metres(1.0), metres(1.0), metres(1.0)).unwrap();
        let mut field: Field<DVector<f64>> =
            Field::new(region, metres(0.5), Configuration::origin()).unwrap();
        field
            .sample(|r| Ok(r.clone()))
            .unwrap();

        let path = std::env::temp_dir().join(format!(
            "qsim-validation-field-{}",
            std::process::id()
        ));
        qsim_core::session::save(&path, &field).unwrap();
        let back: Field<DVector<f64>> = qsim_core::session::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back, field);
        assert_eq!(back.value(1, 1, 1, 0).unwrap(), field.value(1, 1, 1, 0).unwrap());
    }
}
