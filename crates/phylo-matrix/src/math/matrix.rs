use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::math::vector::Vector;

/// Dense `nrows x ncols` matrix of `f64` stored row-major in one buffer.
///
/// Element `(i, j)` lives at offset `i * ncols + j`; the buffer length is
/// always `nrows * ncols`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = ShapeError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        Matrix::from_shape_vec((repr.nrows, repr.ncols), repr.data)
    }
}

impl From<Matrix> for MatrixRepr {
    fn from(m: Matrix) -> Self {
        MatrixRepr {
            nrows: m.rows,
            ncols: m.cols,
            data: m.data,
        }
    }
}

impl Matrix {
    /// Allocate an `nrows x ncols` matrix. All elements start at zero.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            rows: nrows,
            cols: ncols,
        }
    }

    /// Square identity matrix of order `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::new(n, n);
        m.set_identity();
        m
    }

    /// Square matrix with `v` on the diagonal and zeros elsewhere.
    pub fn diag(v: &Vector) -> Self {
        let n = v.len();
        let mut m = Matrix::new(n, n);
        for (i, &x) in v.iter().enumerate() {
            m[(i, i)] = x;
        }
        m
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Deep-copy the leading `nrows x ncols` block of a 2D array.
    ///
    /// # Panics
    ///
    /// If `array` has fewer than `nrows` rows or any of those rows has fewer
    /// than `ncols` values.
    pub fn from_array<R: AsRef<[f64]>>(array: &[R], nrows: usize, ncols: usize) -> Self {
        assert!(
            array.len() >= nrows,
            "from_array: source has {} rows, expected {}",
            array.len(),
            nrows
        );
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in &array[..nrows] {
            let row = row.as_ref();
            assert!(
                row.len() >= ncols,
                "from_array: source row has {} columns, expected {}",
                row.len(),
                ncols
            );
            data.extend_from_slice(&row[..ncols]);
        }
        Self {
            data,
            rows: nrows,
            cols: ncols,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self[(row, col)] = value;
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row index out of bounds");
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [f64] {
        assert!(row < self.rows, "row index out of bounds");
        let start = row * self.cols;
        let cols = self.cols;
        &mut self.data[start..start + cols]
    }

    /// Copy of row `row` as a new vector.
    pub fn get_row(&self, row: usize) -> Vector {
        Vector::from_vec(self.row_slice(row).to_vec())
    }

    /// Copy of column `col` as a new vector.
    pub fn get_col(&self, col: usize) -> Vector {
        assert!(col < self.cols, "column index out of bounds");
        (0..self.rows).map(|row| self[(row, col)]).collect()
    }

    /// Ones where `row == col`, zeros elsewhere. The matrix need not be square.
    pub fn set_identity(&mut self) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                self[(i, j)] = if i == j { 1.0 } else { 0.0 };
            }
        }
    }

    pub fn zero(&mut self) {
        self.set_all(0.0);
    }

    pub fn set_all(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Element-wise copy of `src` into `self`.
    ///
    /// # Panics
    ///
    /// If the shapes differ.
    pub fn copy_from(&mut self, src: &Matrix) {
        assert_eq!(
            self.shape(),
            src.shape(),
            "copy_from requires matrices of identical shape"
        );
        self.data.copy_from_slice(&src.data);
    }

    /// Allocate a deep copy of `self`.
    pub fn create_copy(&self) -> Matrix {
        self.clone()
    }

    /// New `ncols x nrows` matrix with `t[(j, i)] == self[(i, j)]`.
    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::new(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }

    /// Change the shape in place.
    ///
    /// Cells inside both the old and the new extent keep their values, new
    /// cells are zero and truncated cells are discarded.
    pub fn resize(&mut self, nrows: usize, ncols: usize) {
        if (nrows, ncols) == self.shape() {
            return;
        }
        let mut data = vec![0.0; nrows * ncols];
        let keep_rows = nrows.min(self.rows);
        let keep_cols = ncols.min(self.cols);
        for i in 0..keep_rows {
            data[i * ncols..i * ncols + keep_cols].copy_from_slice(&self.row_slice(i)[..keep_cols]);
        }
        self.data = data;
        self.rows = nrows;
        self.cols = ncols;
    }

    pub fn scale(&mut self, factor: f64) {
        for v in self.data.iter_mut() {
            *v *= factor;
        }
    }

    /// `self += addend`, element-wise.
    pub fn add_in_place(&mut self, addend: &Matrix) {
        assert_eq!(
            self.shape(),
            addend.shape(),
            "add_in_place requires matrices of identical shape"
        );
        for (d, s) in self.data.iter_mut().zip(addend.data.iter()) {
            *d += *s;
        }
    }

    /// `self -= subtrahend`, element-wise.
    pub fn subtract_in_place(&mut self, subtrahend: &Matrix) {
        assert_eq!(
            self.shape(),
            subtrahend.shape(),
            "subtract_in_place requires matrices of identical shape"
        );
        for (d, s) in self.data.iter_mut().zip(subtrahend.data.iter()) {
            *d -= *s;
        }
    }

    /// `self = coef_self * self + coef_other * other`, element-wise.
    ///
    /// This is the aliasing form of [`crate::math::linear_combination`] where
    /// the destination is also the first source.
    pub fn combine_in_place(&mut self, coef_self: f64, other: &Matrix, coef_other: f64) {
        assert_eq!(
            self.shape(),
            other.shape(),
            "combine_in_place requires matrices of identical shape"
        );
        for (d, s) in self.data.iter_mut().zip(other.data.iter()) {
            *d = coef_self * *d + coef_other * *s;
        }
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        assert_eq!(
            self.shape(),
            other.shape(),
            "max_abs_diff requires matrices of identical shape"
        );
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    pub fn to_ndarray(&self) -> ndarray::Array2<f64> {
        ndarray::Array2::from_shape_vec((self.rows, self.cols), self.data.clone())
            .expect("buffer length always matches shape")
    }
}

impl From<ndarray::Array2<f64>> for Matrix {
    fn from(value: ndarray::Array2<f64>) -> Self {
        let (rows, cols) = value.dim();
        Matrix {
            data: value.iter().copied().collect(),
            rows,
            cols,
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::io::text::render(self, &Default::default()))
    }
}

#[derive(Debug, Clone)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}
