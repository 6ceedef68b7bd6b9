//! Matrix inversion through an LU factorization backend.
//!
//! Backends follow the LAPACK `getrf`/`getri` contract: they operate on
//! column-major `n x n` buffers, record 1-based pivot indices and report
//! failure through the `info` convention (`info > 0`: singular pivot,
//! `info < 0`: illegal argument). `Matrix` is row-major, so [`invert_with`]
//! transposes on the way in and on the way out.
#[cfg(feature = "lapack")]
pub mod lapack;
#[cfg(feature = "native")]
pub mod native;

use crate::config::BackendKind;
use crate::error::MatrixError;
use crate::math::Matrix;

#[cfg(feature = "lapack")]
pub use self::lapack::LapackLu;
#[cfg(feature = "native")]
pub use self::native::NativeLu;

/// Dense LU factorization with the LAPACK `dgetrf`/`dgetri` contract.
pub trait Factorization {
    fn name(&self) -> &'static str;

    /// Factor the column-major `n x n` buffer `a` in place as `P * L * U`.
    ///
    /// `ipiv[i]` receives the 1-based row interchanged with row `i + 1`.
    fn getrf(&self, n: usize, a: &mut [f64], ipiv: &mut [i32]) -> Result<(), MatrixError>;

    /// Overwrite the factors produced by [`Factorization::getrf`] with the
    /// inverse of the original matrix.
    fn getri(&self, n: usize, a: &mut [f64], ipiv: &[i32]) -> Result<(), MatrixError>;
}

/// Stand-in used when the requested backend is not compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Factorization for Unavailable {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn getrf(&self, _n: usize, _a: &mut [f64], _ipiv: &mut [i32]) -> Result<(), MatrixError> {
        Err(MatrixError::BackendUnavailable)
    }

    fn getri(&self, _n: usize, _a: &mut [f64], _ipiv: &[i32]) -> Result<(), MatrixError> {
        Err(MatrixError::BackendUnavailable)
    }
}

/// Map a LAPACK `info` value onto the crate error type.
pub(crate) fn check_info(routine: &'static str, info: i32) -> Result<(), MatrixError> {
    match info {
        0 => Ok(()),
        i if i > 0 => Err(MatrixError::Singular {
            routine,
            index: i as usize,
        }),
        i => Err(MatrixError::IllegalArgument {
            routine,
            position: i.unsigned_abs() as usize,
        }),
    }
}

/// Validate buffer sizes, reporting the offending argument position the way
/// LAPACK numbers them.
pub(crate) fn check_buffers(
    routine: &'static str,
    n: usize,
    a: &[f64],
    a_position: i32,
    ipiv_len: usize,
    ipiv_position: i32,
) -> Result<(), MatrixError> {
    if a.len() < n * n {
        return check_info(routine, -a_position);
    }
    if ipiv_len < n {
        return check_info(routine, -ipiv_position);
    }
    Ok(())
}

/// Backend for `kind`, or [`Unavailable`] when it was not compiled in.
pub fn backend(kind: BackendKind) -> Box<dyn Factorization> {
    match kind {
        #[cfg(feature = "native")]
        BackendKind::Native => Box::new(NativeLu),
        #[cfg(feature = "lapack")]
        BackendKind::Lapack => Box::new(LapackLu),
        #[allow(unreachable_patterns)]
        _ => {
            log::debug!("Backend '{}' is not compiled into this build", kind.name());
            Box::new(Unavailable)
        }
    }
}

pub fn default_backend() -> Box<dyn Factorization> {
    backend(BackendKind::default())
}

/// `dest = inverse(src)` using the default backend.
///
/// On failure the error is logged and returned, and `dest` is left untouched.
///
/// # Panics
///
/// Unless `src` is square and `dest` has the same shape.
pub fn invert(dest: &mut Matrix, src: &Matrix) -> Result<(), MatrixError> {
    invert_with(default_backend().as_ref(), dest, src)
}

/// `dest = inverse(src)` using `backend`.
pub fn invert_with(backend: &dyn Factorization, dest: &mut Matrix, src: &Matrix) -> Result<(), MatrixError> {
    assert!(
        src.is_square() && dest.shape() == src.shape(),
        "invert requires a square source and a destination of the same order (src {:?}, dest {:?})",
        src.shape(),
        dest.shape()
    );
    let n = src.nrows();
    log::trace!("Inverting {}x{} matrix with the {} backend", n, n, backend.name());

    // The row-major buffer of src^T is the column-major buffer of src.
    let mut a = src.transpose().into_vec();
    let mut ipiv = vec![0i32; n];

    if let Err(err) = backend.getrf(n, &mut a, &mut ipiv) {
        log::error!(
            "Unable to compute LU factorization of matrix (for matrix inversion): {}",
            err
        );
        return Err(err);
    }
    if let Err(err) = backend.getri(n, &mut a, &ipiv) {
        log::error!("Unable to invert matrix: {}", err);
        return Err(err);
    }

    // `a` holds the inverse column-major; transpose it back into row-major.
    for i in 0..n {
        for j in 0..n {
            dest[(i, j)] = a[j * n + i];
        }
    }
    Ok(())
}

impl Matrix {
    /// Allocating inverse using the default backend.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        let mut inv = Matrix::new(self.nrows(), self.ncols());
        invert(&mut inv, self)?;
        Ok(inv)
    }
}
