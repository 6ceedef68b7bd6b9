//! Pure-Rust unblocked `dgetrf`/`dgetri`.
//!
//! Operates on column-major buffers: element `(i, j)` of the `n x n` matrix
//! is `a[i + j * n]`.
use crate::error::MatrixError;
use crate::linalg::{check_buffers, check_info, Factorization};

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLu;

impl Factorization for NativeLu {
    fn name(&self) -> &'static str {
        "native"
    }

    /// Right-looking LU with partial pivoting (LAPACK `dgetf2`).
    fn getrf(&self, n: usize, a: &mut [f64], ipiv: &mut [i32]) -> Result<(), MatrixError> {
        check_buffers("dgetrf", n, a, 3, ipiv.len(), 5)?;
        let mut info = 0i32;

        for j in 0..n {
            let col = j * n;

            let mut p = j;
            let mut max = a[col + j].abs();
            for i in j + 1..n {
                let v = a[col + i].abs();
                if v > max {
                    max = v;
                    p = i;
                }
            }
            ipiv[j] = (p + 1) as i32;

            if a[col + p] != 0.0 {
                if p != j {
                    for c in 0..n {
                        a.swap(j + c * n, p + c * n);
                    }
                }
                let pivot = a[col + j];
                for i in j + 1..n {
                    a[col + i] /= pivot;
                }
            } else if info == 0 {
                info = (j + 1) as i32;
            }

            // Rank-1 update of the trailing submatrix.
            for c in j + 1..n {
                let u = a[j + c * n];
                if u != 0.0 {
                    for i in j + 1..n {
                        let l = a[col + i];
                        a[i + c * n] -= l * u;
                    }
                }
            }
        }

        check_info("dgetrf", info)
    }

    /// Inverse from LU factors (LAPACK `dgetri`, unblocked).
    fn getri(&self, n: usize, a: &mut [f64], ipiv: &[i32]) -> Result<(), MatrixError> {
        check_buffers("dgetri", n, a, 2, ipiv.len(), 4)?;

        for i in 0..n {
            if a[i + i * n] == 0.0 {
                return check_info("dgetri", (i + 1) as i32);
            }
        }

        // inv(U), column by column (dtrti2).
        for j in 0..n {
            let jj = j + j * n;
            a[jj] = 1.0 / a[jj];
            let ajj = -a[jj];
            for k in 0..j {
                let temp = a[k + j * n];
                if temp != 0.0 {
                    for i in 0..k {
                        let t = a[i + k * n];
                        a[i + j * n] += temp * t;
                    }
                    a[k + j * n] = temp * a[k + k * n];
                }
            }
            for i in 0..j {
                a[i + j * n] *= ajj;
            }
        }

        // Solve inv(A) * L = inv(U) for inv(A), last column first.
        let mut work = vec![0.0; n];
        for j in (0..n).rev() {
            for i in j + 1..n {
                work[i] = a[i + j * n];
                a[i + j * n] = 0.0;
            }
            for k in j + 1..n {
                let w = work[k];
                if w != 0.0 {
                    for i in 0..n {
                        let t = a[i + k * n];
                        a[i + j * n] -= t * w;
                    }
                }
            }
        }

        // Undo the row interchanges of getrf as column interchanges.
        for j in (0..n.saturating_sub(1)).rev() {
            let jp = (ipiv[j] - 1) as usize;
            if jp != j {
                for i in 0..n {
                    a.swap(i + j * n, i + jp * n);
                }
            }
        }

        Ok(())
    }
}
