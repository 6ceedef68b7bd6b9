//! Dense containers and the arithmetic defined on them.
//!
//! Provides `Matrix` (2D, row-major) and `Vector` (1D). Both own a single
//! contiguous buffer; element storage is always fully initialized.
pub mod matrix;
pub mod ops;
pub mod vector;

pub use matrix::{Matrix, ShapeError};
pub use ops::{
    diagonal_triple_product, linear_combination, multiply, vector_multiply,
};
pub use vector::Vector;
