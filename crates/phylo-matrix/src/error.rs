use std::error::Error;
use std::fmt;
use std::io;

/// Recoverable failures raised by inversion and text input.
///
/// Shape mismatches are not represented here: they are caller bugs and panic.
#[derive(Debug)]
pub enum MatrixError {
    /// A factorization routine reported `info > 0`: `U(index, index)` is
    /// exactly zero (1-based, as reported by the backend).
    Singular { routine: &'static str, index: usize },
    /// A factorization routine reported `info < 0`: argument `position`
    /// (1-based) had an illegal value.
    IllegalArgument { routine: &'static str, position: usize },
    /// No factorization backend was compiled into this build.
    BackendUnavailable,
    /// The stream ended after `found` of `expected` values.
    UnexpectedEof { expected: usize, found: usize },
    /// Token number `index` (0-based, row-major) is not a floating-point number.
    InvalidToken { index: usize, token: String },
    Io(io::Error),
}

impl MatrixError {
    /// True only for [`MatrixError::Singular`].
    pub fn is_singular(&self) -> bool {
        matches!(self, MatrixError::Singular { .. })
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Singular { routine, index } => write!(
                f,
                "matrix is singular -- cannot invert ({} returned {})",
                routine, index
            ),
            MatrixError::IllegalArgument { routine, position } => write!(
                f,
                "unable to invert matrix: argument {} had an illegal value (according to {})",
                position, routine
            ),
            MatrixError::BackendUnavailable => write!(
                f,
                "no factorization backend available; enable the `native` or `lapack` feature"
            ),
            MatrixError::UnexpectedEof { expected, found } => write!(
                f,
                "unexpected end of input: expected {} values, found {}",
                expected, found
            ),
            MatrixError::InvalidToken { index, token } => {
                write!(f, "invalid number '{}' at value {}", token, index)
            }
            MatrixError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for MatrixError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MatrixError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MatrixError {
    fn from(err: io::Error) -> Self {
        MatrixError::Io(err)
    }
}
