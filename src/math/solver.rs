use nalgebra::{DMatrix, DVector};

use crate::error::MathError;

/// Solves a dense linear system by Gauss-Jordan elimination with partial pivoting.
///
/// `augmented` is the `n x (n + 1)` matrix `[A | b]`; the result is `x` with
/// `A x = b`. The matrix is consumed and used as scratch space.
///
/// # Errors
///
/// - `MathError::DimensionMismatch` if the matrix is not `n x (n + 1)`
/// - `MathError::SingularMatrix` if a pivot is exactly zero after row exchange
pub fn solve_matrix(mut augmented: DMatrix<f64>) -> Result<DVector<f64>, MathError> {
    let n = augmented.nrows();
    if n == 0 || augmented.ncols() != n + 1 {
        return Err(MathError::DimensionMismatch {
            rows: n,
            cols: augmented.ncols(),
        });
    }

    for i in 0..n {
        let mut max_row = i;
        let mut max_cell = augmented[(i, i)].abs();
        for k in (i + 1)..n {
            let cell = augmented[(k, i)].abs();
            if cell > max_cell {
                max_cell = cell;
                max_row = k;
            }
        }
        if max_row != i {
            augmented.swap_rows(i, max_row);
        }

        let pivot = augmented[(i, i)];
        if pivot == 0.0 {
            return Err(MathError::SingularMatrix { column: i });
        }

        for k in (i + 1)..n {
            let c = -augmented[(k, i)] / pivot;
            augmented[(k, i)] = 0.0;
            for j in (i + 1)..=n {
                augmented[(k, j)] += c * augmented[(i, j)];
            }
        }
    }

    // Back substitution on the upper triangular system.
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        x[i] = augmented[(i, n)] / augmented[(i, i)];
        for k in 0..i {
            augmented[(k, n)] -= augmented[(k, i)] * x[i];
        }
    }

    Ok(x)
}

/// Solves the 2x2 system `[a | b] x = c` given as columns.
///
/// # Errors
///
/// Returns `MathError::SingularMatrix` when `a` and `b` are parallel.
pub fn solve_2x2(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Result<(f64, f64), MathError> {
    let x = solve_matrix(DMatrix::from_row_slice(
        2,
        3,
        &[a[0], b[0], c[0], a[1], b[1], c[1]],
    ))?;
    Ok((x[0], x[1]))
}
