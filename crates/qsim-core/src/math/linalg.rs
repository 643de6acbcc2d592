//! Determinant, inversion and matrix exponential on square matrices.

use nalgebra::DMatrix;

use crate::error::{Error, Result};

/// Default number of Taylor terms for the matrix exponential.
///
/// The series is truncated, not closed-form; correctness relies on
/// convergence, which is fast for the small rotation-scale matrices this
/// core works with.
pub const EXP_TERMS: usize = 1000;

fn expect_square(m: &DMatrix<f64>) -> Result<usize> {
    if m.nrows() != m.ncols() {
        return Err(Error::shape(format!(
            "{}x{} matrix is not square",
            m.nrows(),
            m.ncols()
        )));
    }
    if m.nrows() == 0 {
        return Err(Error::shape("empty matrix"));
    }
    Ok(m.nrows())
}

/// Determinant by recursive cofactor expansion along the first row.
pub fn determinant(m: &DMatrix<f64>) -> Result<f64> {
    expect_square(m)?;

    fn expand(m: &DMatrix<f64>) -> f64 {
        let n = m.nrows();
        if n == 1 {
            return m[(0, 0)];
        }
        let mut acc = 0.0;
        for j in 0..n {
            let minor = m.clone().remove_row(0).remove_column(j);
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            acc += sign * m[(0, j)] * expand(&minor);
        }
        acc
    }

    Ok(expand(m))
}

/// Inverse by Gauss-Jordan elimination with partial pivoting.
///
/// The pivot for each column is the remaining row with the largest
/// absolute entry. Fails with [`Error::SingularMatrix`] when the
/// determinant is exactly zero.
pub fn inverse(m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let n = expect_square(m)?;
    if determinant(m)? == 0.0 {
        return Err(Error::SingularMatrix);
    }

    let mut aux = m.clone();
    let mut inv = DMatrix::identity(n, n);
    for j in 0..n {
        let mut pivot = j;
        let mut largest = aux[(j, j)].abs();
        for i in (j + 1)..n {
            if aux[(i, j)].abs() > largest {
                pivot = i;
                largest = aux[(i, j)].abs();
            }
        }
        aux.swap_rows(j, pivot);
        inv.swap_rows(j, pivot);

        let scale = 1.0 / aux[(j, j)];
        for c in 0..n {
            aux[(j, c)] *= scale;
            inv[(j, c)] *= scale;
        }

        for i in 0..n {
            if i == j {
                continue;
            }
            let factor = -aux[(i, j)];
            for c in 0..n {
                let a = aux[(j, c)];
                let b = inv[(j, c)];
                aux[(i, c)] += factor * a;
                inv[(i, c)] += factor * b;
            }
        }
    }
    Ok(inv)
}

/// Matrix exponential by truncated Taylor series with `terms` terms.
pub fn matrix_exp_terms(m: &DMatrix<f64>, terms: usize) -> Result<DMatrix<f64>> {
    let n = expect_square(m)?;
    let mut sum = DMatrix::identity(n, n);
    let mut term = DMatrix::identity(n, n);
    for k in 1..terms {
        term = (&term * m) / k as f64;
        sum += &term;
    }
    Ok(sum)
}

/// Matrix exponential with the default term count.
pub fn matrix_exp(m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    matrix_exp_terms(m, EXP_TERMS)
}
