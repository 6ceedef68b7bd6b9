//! phylo-matrix: dense matrix and vector types for phylogenetic models.
//!
//! This crate provides a row-major `Matrix` of `f64` and a companion `Vector`,
//! the arithmetic used when working with substitution rate matrices
//! (products, scaling, linear combinations and the diagonal-weighted triple
//! product `B * diag(v) * D`), a shape-less text format, and matrix inversion
//! through an LU factorization backend with the LAPACK `getrf`/`getri`
//! contract.
//!
//! Shape mismatches are programming errors and panic. Numerical failures
//! (singular input, backend errors) and malformed text input are reported
//! through [`MatrixError`].
#[cfg(feature = "lapack")]
extern crate lapack_src;

pub mod config;
pub mod error;
pub mod io;
pub mod linalg;
pub mod math;

pub use error::MatrixError;
pub use linalg::{invert, invert_with};
pub use math::{Matrix, ShapeError, Vector};
