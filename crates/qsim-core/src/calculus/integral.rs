//! Definite and indefinite integrals by the composite Simpson rule.

use crate::error::Result;
use crate::quantity::{Quantity, Value};

/// Simpson contribution of a single panel `[a, b]`:
/// `(b − a)·(f(a) + 4·f(m) + f(b))/6` with `m` the midpoint.
fn simpson_panel(f: &Value, a: &Quantity, b: &Quantity) -> Result<Quantity> {
    let width = b.sub(a)?;
    let midpoint = a.add(b)?.scale(0.5);
    let weighted = Quantity::sum(&[f.eval(a)?, f.eval(&midpoint)?.scale(4.0), f.eval(b)?])?;
    Ok(width.mul(&weighted)?.scale(1.0 / 6.0))
}

/// Definite integral of `f` over `[a, b]`.
///
/// The interval is split into `ceil((b − a)/step)` panels (at least one)
/// so no panel is wider than `step`, and the per-panel Simpson
/// contributions are summed. `a == b` returns an exact zero with the
/// combined unit, without sampling a panel.
pub fn definite_integral(f: &Value, a: &Quantity, b: &Quantity, step: f64) -> Result<Quantity> {
    a.expect_unit(b.unit)?;
    if a == b {
        let sample = f.eval(a)?;
        return Ok(Quantity::scalar(0.0, sample.unit * a.unit));
    }

    let delta = b.sub(a)?;
    let panels = (delta.magnitude.as_scalar()? / step).ceil().max(1.0) as usize;
    let width = delta.scale(1.0 / panels as f64);

    let mut parts = Vec::with_capacity(panels);
    for i in 0..panels {
        let left = a.add(&width.scale(i as f64))?;
        let right = a.add(&width.scale((i + 1) as f64))?;
        parts.push(simpson_panel(f, &left, &right)?);
    }
    Quantity::sum(&parts)
}

/// Indefinite integral: the definite integral from a fixed lower bound,
/// as a function of the upper bound.
pub fn indefinite_integral(f: &Value, lower: &Quantity, step: f64) -> Value {
    let f = f.clone();
    let lower = lower.clone();
    Value::function(move |x: &Quantity| definite_integral(&f, &lower, x, step))
}
