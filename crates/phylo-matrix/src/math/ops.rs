//! Matrix products and combinations writing into caller-owned destinations.
//!
//! Every function asserts its shape contract and panics on mismatch. Loops
//! run row by row, column by column, with the inner dimension last, so
//! results are reproducible bit for bit.
use std::ops::{AddAssign, Mul, MulAssign, SubAssign};

use crate::math::matrix::Matrix;
use crate::math::vector::Vector;

/// `prod = a * b`.
///
/// # Panics
///
/// Unless `a.ncols() == b.nrows()` and `prod` is `a.nrows() x b.ncols()`.
pub fn multiply(prod: &mut Matrix, a: &Matrix, b: &Matrix) {
    assert!(
        a.ncols() == b.nrows() && prod.shape() == (a.nrows(), b.ncols()),
        "multiply: cannot store {:?} x {:?} into {:?}",
        a.shape(),
        b.shape(),
        prod.shape()
    );
    let inner = a.ncols();
    for i in 0..prod.nrows() {
        for j in 0..prod.ncols() {
            let mut acc = 0.0;
            for k in 0..inner {
                acc += a[(i, k)] * b[(k, j)];
            }
            prod[(i, j)] = acc;
        }
    }
}

/// `prod = m * v`.
///
/// Row `i` of `m` is paired with `v` element by element; columns past the
/// end of `v` do not contribute.
///
/// # Panics
///
/// Unless `m.nrows() == v.len() == prod.len()`.
pub fn vector_multiply(prod: &mut Vector, m: &Matrix, v: &Vector) {
    assert!(
        m.nrows() == v.len() && v.len() == prod.len(),
        "vector_multiply: cannot store {:?} x ({},) into ({},)",
        m.shape(),
        v.len(),
        prod.len()
    );
    for i in 0..m.nrows() {
        prod[i] = m
            .row_slice(i)
            .iter()
            .zip(v.iter())
            .fold(0.0, |acc, (&x, &y)| acc + x * y);
    }
}

/// `dest = coef1 * src1 + coef2 * src2`, element-wise.
///
/// `dest` cannot alias a source; use [`Matrix::combine_in_place`] for that.
pub fn linear_combination(dest: &mut Matrix, src1: &Matrix, coef1: f64, src2: &Matrix, coef2: f64) {
    assert!(
        dest.shape() == src1.shape() && dest.shape() == src2.shape(),
        "linear_combination requires matrices of identical shape ({:?}, {:?}, {:?})",
        dest.shape(),
        src1.shape(),
        src2.shape()
    );
    let out = dest.as_mut_slice();
    for ((d, a), b) in out.iter_mut().zip(src1.as_slice()).zip(src2.as_slice()) {
        *d = coef1 * a + coef2 * b;
    }
}

/// `result = b * diag(diag) * d` without materializing the diagonal matrix.
///
/// `result[i][j] = sum_k b[i][k] * diag[k] * d[k][j]`.
///
/// # Panics
///
/// Unless `b`, `d` and `result` are square of order `diag.len()`.
pub fn diagonal_triple_product(result: &mut Matrix, b: &Matrix, diag: &Vector, d: &Matrix) {
    let n = diag.len();
    assert!(
        result.shape() == (n, n) && b.shape() == (n, n) && d.shape() == (n, n),
        "diagonal_triple_product requires square matrices of order {} (result {:?}, b {:?}, d {:?})",
        n,
        result.shape(),
        b.shape(),
        d.shape()
    );
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..n {
                acc += b[(i, k)] * diag[k] * d[(k, j)];
            }
            result[(i, j)] = acc;
        }
    }
}

impl Matrix {
    /// Allocating matrix product `self * rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        let mut prod = Matrix::new(self.nrows(), rhs.ncols());
        multiply(&mut prod, self, rhs);
        prod
    }

    /// Allocating matrix-vector product `self * v`.
    pub fn dot_vector(&self, v: &Vector) -> Vector {
        let mut prod = Vector::new(self.nrows());
        vector_multiply(&mut prod, self, v);
        prod
    }
}

impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &'b Matrix) -> Self::Output {
        self.dot(rhs)
    }
}

impl<'a, 'b> Mul<&'b Vector> for &'a Matrix {
    type Output = Vector;

    fn mul(self, rhs: &'b Vector) -> Self::Output {
        self.dot_vector(rhs)
    }
}

impl<'a> AddAssign<&'a Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &'a Matrix) {
        self.add_in_place(rhs);
    }
}

impl<'a> SubAssign<&'a Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &'a Matrix) {
        self.subtract_in_place(rhs);
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale(rhs);
    }
}
