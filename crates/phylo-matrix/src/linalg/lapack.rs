//! System LAPACK backend.
//!
//! Enable with the `lapack` feature:
//! ```toml
//! [dependencies]
//! phylo-matrix = { version = "0.1", features = ["lapack"] }
//! ```
use crate::error::MatrixError;
use crate::linalg::{check_buffers, check_info, Factorization};

#[derive(Debug, Clone, Copy, Default)]
pub struct LapackLu;

impl Factorization for LapackLu {
    fn name(&self) -> &'static str {
        "lapack"
    }

    fn getrf(&self, n: usize, a: &mut [f64], ipiv: &mut [i32]) -> Result<(), MatrixError> {
        check_buffers("dgetrf", n, a, 3, ipiv.len(), 5)?;
        let n = n as i32;
        let mut info = 0;
        // SAFETY: `a` holds at least n*n values and `ipiv` at least n, as checked above.
        unsafe {
            ::lapack::dgetrf(n, n, a, n.max(1), ipiv, &mut info);
        }
        check_info("dgetrf", info)
    }

    fn getri(&self, n: usize, a: &mut [f64], ipiv: &[i32]) -> Result<(), MatrixError> {
        check_buffers("dgetri", n, a, 2, ipiv.len(), 4)?;
        let n = n as i32;
        let lwork = n.max(1);
        let mut work = vec![0.0; lwork as usize];
        let mut info = 0;
        // SAFETY: buffer sizes checked above; `work` holds `lwork` values.
        unsafe {
            ::lapack::dgetri(n, a, n.max(1), ipiv, &mut work, lwork, &mut info);
        }
        check_info("dgetri", info)
    }
}
