//! Ready-made units for the quantities the core exchanges internally.
//!
//! Exponent order is (mass, length, time, current, temperature, amount,
//! luminous intensity).

use super::Unit;

pub const DIMENSIONLESS: Unit = Unit::from_exponents([0, 0, 0, 0, 0, 0, 0]);

pub const KILOGRAM: Unit = Unit::from_exponents([1, 0, 0, 0, 0, 0, 0]);
pub const METRE: Unit = Unit::from_exponents([0, 1, 0, 0, 0, 0, 0]);
pub const SECOND: Unit = Unit::from_exponents([0, 0, 1, 0, 0, 0, 0]);
pub const AMPERE: Unit = Unit::from_exponents([0, 0, 0, 1, 0, 0, 0]);

/// C, electric charge.
pub const COULOMB: Unit = Unit::from_exponents([0, 0, 1, 1, 0, 0, 0]);
/// N, force.
pub const NEWTON: Unit = Unit::from_exponents([1, 1, -2, 0, 0, 0, 0]);
/// N·m, torque.
pub const NEWTON_METRE: Unit = Unit::from_exponents([1, 2, -2, 0, 0, 0, 0]);
/// T, magnetic field.
pub const TESLA: Unit = Unit::from_exponents([1, 0, -2, -1, 0, 0, 0]);

/// m·s⁻¹, speed.
pub const METRE_PER_SECOND: Unit = Unit::from_exponents([0, 1, -1, 0, 0, 0, 0]);
/// m·s⁻², acceleration.
pub const METRE_PER_SECOND2: Unit = Unit::from_exponents([0, 1, -2, 0, 0, 0, 0]);
/// s⁻¹, angular velocity.
pub const PER_SECOND: Unit = Unit::from_exponents([0, 0, -1, 0, 0, 0, 0]);
/// s⁻², angular acceleration.
pub const PER_SECOND2: Unit = Unit::from_exponents([0, 0, -2, 0, 0, 0, 0]);

/// A·m², magnetic moment.
pub const AMPERE_METRE2: Unit = Unit::from_exponents([0, 2, 0, 1, 0, 0, 0]);
/// kg·m², moment of inertia.
pub const KILOGRAM_METRE2: Unit = Unit::from_exponents([1, 2, 0, 0, 0, 0, 0]);
/// N·m²·kg⁻², the unit of the gravitational constant.
pub const NEWTON_METRE2_PER_KILOGRAM2: Unit = Unit::from_exponents([-1, 3, -2, 0, 0, 0, 0]);
