//! Unit algebra over the seven SI base dimensions.
//!
//! A unit is a vector of seven signed integer exponents, one per SI base
//! unit (kg, m, s, A, K, mol, cd). Units combine under multiplication,
//! division and exponentiation, parse from compound strings such as
//! `"N.m.s-2"`, and render back to a canonical symbol.

pub mod si;
mod tables;

pub use tables::{BASE_UNITS, DERIVED_UNITS, USUAL_UNITS};

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The unit of a physical quantity, encoded as SI base-unit exponents.
///
/// The exponent order is (mass, length, time, current, temperature,
/// amount of substance, luminous intensity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Unit {
    exponents: [i32; 7],
}

/// Floor division, matching mathematical `⌊a/b⌋` for either sign of `b`.
fn floor_div(a: i32, b: i32) -> i32 {
    let q = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

impl Unit {
    /// The dimensionless unit (all exponents zero).
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Build a unit directly from its seven base exponents.
    pub const fn from_exponents(exponents: [i32; 7]) -> Self {
        Self { exponents }
    }

    /// The raw exponent vector.
    pub fn exponents(&self) -> [i32; 7] {
        self.exponents
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents == [0; 7]
    }

    /// Parse a single symbol (without exponent) against the base, derived
    /// and usual tables, in that order.
    fn lookup_symbol(symbol: &str) -> Result<[i32; 7]> {
        for table in [&BASE_UNITS[..], &DERIVED_UNITS[..], &USUAL_UNITS[..]] {
            for &(s, exponents, _) in table.iter() {
                if symbol == s {
                    return Ok(exponents);
                }
            }
        }
        Err(Error::UnknownUnit {
            symbol: symbol.to_owned(),
        })
    }

    /// Parse the exponent part of a segment; an empty string means 1.
    fn lookup_power(text: &str) -> Result<i32> {
        if text.is_empty() {
            return Ok(1);
        }
        text.parse().map_err(|_| Error::InvalidPower {
            text: text.to_owned(),
        })
    }

    /// Parse a compound unit string such as `"N.m.s-2"`.
    ///
    /// The string is split on `.`; in each segment the symbol is the part
    /// left after trimming digits and signs, and the exponent is the part
    /// left after trimming letters (1 when absent).
    pub fn parse(text: &str) -> Result<Self> {
        let mut exponents = [0i32; 7];
        for segment in text.split('.') {
            let symbol =
                segment.trim_matches(|c: char| c.is_ascii_digit() || c == '+' || c == '-');
            let power = segment.trim_matches(|c: char| c.is_ascii_alphabetic());
            let dimension = Self::lookup_symbol(symbol)?;
            let power = Self::lookup_power(power)?;
            for i in 0..7 {
                exponents[i] += dimension[i] * power;
            }
        }
        Ok(Self { exponents })
    }

    /// Raise the unit to an integer power.
    pub fn pow_int(&self, power: i32) -> Self {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e *= power;
        }
        Self { exponents }
    }

    /// Raise the unit to a real power.
    ///
    /// Only allowed when every resulting exponent is itself an integer
    /// (e.g. the square root of an area).
    pub fn pow_real(&self, power: f64) -> Result<Self> {
        let mut exponents = [0i32; 7];
        for i in 0..7 {
            let scaled = self.exponents[i] as f64 * power;
            if scaled.fract() != 0.0 {
                return Err(Error::FractionalDimension {
                    power,
                    unit: self.to_string(),
                });
            }
            exponents[i] = scaled as i32;
        }
        Ok(Self { exponents })
    }

    /// Require all units in `units` to be equal and return that unit.
    pub fn common(units: &[Unit]) -> Result<Unit> {
        let first = *units.first().ok_or(Error::EmptyArguments)?;
        for unit in &units[1..] {
            if *unit != first {
                return Err(Error::UnitMismatch {
                    left: first.to_string(),
                    right: unit.to_string(),
                });
            }
        }
        Ok(first)
    }

    /// Require the unit to be dimensionless.
    pub fn expect_dimensionless(&self) -> Result<()> {
        if self.is_dimensionless() {
            Ok(())
        } else {
            Err(Error::NotDimensionless {
                unit: self.to_string(),
            })
        }
    }

    /// How many whole times `divisor` fits in this unit.
    ///
    /// For each axis where `divisor` is nonzero the candidate positive and
    /// negative quotients are floor-divided and clamped at zero; the
    /// result is the difference of the componentwise minima. A nonzero
    /// result means `divisor` divides this unit that many times with all
    /// remaining exponents keeping their sign.
    fn quotient(&self, divisor: &[i32; 7]) -> i32 {
        let mut positive = i32::MAX;
        let mut negative = i32::MAX;
        for i in 0..7 {
            if divisor[i] != 0 {
                positive = positive.min(floor_div(self.exponents[i], divisor[i]).max(0));
                negative = negative.min(floor_div(-self.exponents[i], divisor[i]).max(0));
            }
        }
        if positive == i32::MAX {
            0
        } else {
            positive - negative
        }
    }

    /// The descriptive name of the unit, or `"unknown"`.
    pub fn name(&self) -> &'static str {
        for table in [&BASE_UNITS[..], &DERIVED_UNITS[..], &USUAL_UNITS[..]] {
            for &(_, exponents, name) in table.iter() {
                if self.exponents == exponents {
                    return name;
                }
            }
        }
        "unknown"
    }

    /// The dimensional formula, e.g. `"M1.L2.T-2"` for an energy.
    pub fn dimension_string(&self) -> String {
        const POWERS: [&str; 7] = ["M", "L", "T", "I", "\u{03F4}", "N", "J"];
        let parts: Vec<String> = (0..7)
            .filter(|&i| self.exponents[i] != 0)
            .map(|i| format!("{}{}", POWERS[i], self.exponents[i]))
            .collect();
        parts.join(".")
    }

    /// Render the exponent vector to its canonical symbol.
    ///
    /// Tries in order: an exact match in the usual table; a greedy
    /// decomposition into the heaviest compatible derived unit, recursing
    /// on the remainder; a dot-joined list of base symbols.
    fn render(&self, out: &mut String) {
        for &(symbol, exponents, _) in USUAL_UNITS.iter() {
            if self.exponents == exponents {
                out.push_str(symbol);
                return;
            }
        }

        let mut best: Option<(&str, [i32; 7], i32)> = None;
        let mut best_weight = 0;
        for &(symbol, exponents, _) in DERIVED_UNITS.iter() {
            let quotient = self.quotient(&exponents);
            let weight: i32 = exponents.iter().map(|e| e.abs()).sum();
            if quotient != 0 && weight > best_weight {
                best = Some((symbol, exponents, quotient));
                best_weight = weight;
            }
        }
        if let Some((symbol, exponents, quotient)) = best {
            out.push_str(symbol);
            if quotient != 1 {
                out.push_str(&quotient.to_string());
            }
            let mut remaining = [0i32; 7];
            for i in 0..7 {
                remaining[i] = self.exponents[i] - quotient * exponents[i];
            }
            let remaining = Unit::from_exponents(remaining);
            if !remaining.is_dimensionless() {
                let mut rest = String::new();
                remaining.render(&mut rest);
                if !rest.is_empty() {
                    out.push('.');
                    out.push_str(&rest);
                }
            }
            return;
        }

        let mut parts = Vec::new();
        for i in 0..7 {
            if self.exponents[i] != 0 {
                if self.exponents[i] == 1 {
                    parts.push(BASE_UNITS[i].0.to_owned());
                } else {
                    parts.push(format!("{}{}", BASE_UNITS[i].0, self.exponents[i]));
                }
            }
        }
        out.push_str(&parts.join("."));
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        let mut exponents = [0i32; 7];
        for i in 0..7 {
            exponents[i] = self.exponents[i] + rhs.exponents[i];
        }
        Unit { exponents }
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        let mut exponents = [0i32; 7];
        for i in 0..7 {
            exponents[i] = self.exponents[i] - rhs.exponents[i];
        }
        Unit { exponents }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out);
        f.write_str(&out)
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Unit::parse(s)
    }
}
