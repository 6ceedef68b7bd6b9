//! Integration tests for Matrix construction, shape operations and arithmetic.

use phylo_matrix::math::{diagonal_triple_product, linear_combination, multiply, vector_multiply};
use phylo_matrix::{Matrix, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    let data = (0..rows * cols).map(|_| rng.gen_range(-5.0..5.0)).collect();
    Matrix::from_shape_vec((rows, cols), data).unwrap()
}

// ---------------------------------------------------------------------------
// Construction & lifecycle
// ---------------------------------------------------------------------------

#[test]
fn new_has_requested_shape() {
    let m = Matrix::new(3, 5);
    assert_eq!(m.shape(), (3, 5));
    assert_eq!(m.as_slice().len(), 15);
}

#[test]
fn set_all_reaches_every_cell() {
    for &(rows, cols) in &[(1, 1), (2, 7), (6, 3), (10, 10)] {
        let mut m = Matrix::new(rows, cols);
        m.set_all(3.25);
        for i in 0..rows {
            for j in 0..cols {
                assert_eq!(m.get(i, j), 3.25);
            }
        }
        m.zero();
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }
}

#[test]
fn from_array_deep_copies_leading_block() {
    let mut source = vec![vec![1.0, 2.0, 9.0], vec![3.0, 4.0, 9.0], vec![9.0, 9.0, 9.0]];
    let m = Matrix::from_array(&source, 2, 2);
    source[0][0] = -1.0;
    assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
#[should_panic(expected = "from_array")]
fn from_array_rejects_short_source() {
    let source = [[1.0, 2.0]];
    Matrix::from_array(&source, 2, 2);
}

#[test]
fn from_shape_vec_checks_length() {
    assert!(Matrix::from_shape_vec((2, 2), vec![1.0; 3]).is_err());
    assert!(Matrix::from_shape_vec((0, 4), vec![]).is_ok());
}

#[test]
fn create_copy_is_independent() {
    let mut a = Matrix::identity(3);
    let b = a.create_copy();
    a.set(0, 0, 7.0);
    assert_eq!(b.get(0, 0), 1.0);
}

#[test]
fn copy_from_overwrites_destination() {
    let src = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let mut dest = Matrix::new(2, 2);
    dest.copy_from(&src);
    assert_eq!(dest, src);
}

#[test]
#[should_panic(expected = "identical shape")]
fn copy_from_rejects_shape_mismatch() {
    let mut dest = Matrix::new(2, 3);
    dest.copy_from(&Matrix::new(3, 2));
}

// ---------------------------------------------------------------------------
// Access & shape
// ---------------------------------------------------------------------------

#[test]
fn rows_and_columns_are_copies() {
    let mut m = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let row = m.get_row(1);
    let col = m.get_col(2);
    m.set_all(0.0);
    assert_eq!(row.to_vec(), vec![4.0, 5.0, 6.0]);
    assert_eq!(col.to_vec(), vec![3.0, 6.0]);
}

#[test]
fn identity_on_rectangular_matrix() {
    let mut m = Matrix::new(2, 4);
    m.set_all(9.0);
    m.set_identity();
    assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn transpose_swaps_indices() {
    let m = Matrix::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(t[(j, i)], m[(i, j)]);
        }
    }
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(7);
    for &(rows, cols) in &[(1, 4), (3, 3), (5, 2), (8, 8)] {
        let m = random_matrix(&mut rng, rows, cols);
        assert_eq!(m.transpose().transpose(), m);
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

#[test]
fn identity_is_neutral_for_multiply() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 1..=6 {
        let m = random_matrix(&mut rng, n, n);
        let mut id = Matrix::new(n, n);
        id.set_identity();

        let mut left = Matrix::new(n, n);
        let mut right = Matrix::new(n, n);
        multiply(&mut left, &id, &m);
        multiply(&mut right, &m, &id);
        assert_eq!(left, m);
        assert_eq!(right, m);
    }
}

#[test]
fn multiply_is_reproducible() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_matrix(&mut rng, 4, 6);
    let b = random_matrix(&mut rng, 6, 5);
    let first = a.dot(&b);
    let second = &a * &b;
    assert_eq!(first.as_slice(), second.as_slice());
}

#[test]
fn vector_multiply_matches_matrix_product() {
    let mut rng = StdRng::seed_from_u64(5);
    let m = random_matrix(&mut rng, 4, 4);
    let v = Vector::from_vec((0..4).map(|i| i as f64 - 1.5).collect());
    let mut prod = Vector::new(4);
    vector_multiply(&mut prod, &m, &v);

    let column = Matrix::from_shape_vec((4, 1), v.to_vec()).unwrap();
    let expected = m.dot(&column);
    assert_eq!(prod.as_slice(), expected.as_slice());
}

#[test]
fn scale_and_in_place_accumulation() {
    let mut a = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = Matrix::from_shape_vec((2, 2), vec![1.0, 1.0, 1.0, 1.0]).unwrap();
    a.add_in_place(&b);
    assert_eq!(a.as_slice(), &[2.0, 3.0, 4.0, 5.0]);
    a.subtract_in_place(&b);
    a.subtract_in_place(&b);
    assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
    a.scale(-2.0);
    assert_eq!(a.as_slice(), &[-0.0, -2.0, -4.0, -6.0]);
}

#[test]
#[should_panic(expected = "identical shape")]
fn add_in_place_rejects_mismatch() {
    let mut a = Matrix::new(2, 2);
    a.add_in_place(&Matrix::new(2, 3));
}

#[test]
fn linear_combination_documented_example() {
    let a = Matrix::from_shape_vec((1, 2), vec![1.0, 2.0]).unwrap();
    let b = Matrix::from_shape_vec((1, 2), vec![1.0, 1.0]).unwrap();
    let mut dest = Matrix::new(1, 2);
    linear_combination(&mut dest, &a, 2.0, &b, -1.0);
    assert_eq!(dest.as_slice(), &[1.0, 3.0]);
}

#[test]
fn diagonal_triple_product_equals_explicit_diagonal_products() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 1..=7 {
        let b = random_matrix(&mut rng, n, n);
        let d = random_matrix(&mut rng, n, n);
        let diag: Vector = (0..n).map(|_| rng.gen_range(0.1..2.0)).collect();

        let mut result = Matrix::new(n, n);
        diagonal_triple_product(&mut result, &b, &diag, &d);

        let expected = b.dot(&Matrix::diag(&diag)).dot(&d);
        assert!(result.max_abs_diff(&expected) < 1e-12);
    }
}

#[test]
fn resize_keeps_overlap() {
    let mut m = Matrix::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    m.resize(3, 1);
    assert_eq!(m.shape(), (3, 1));
    assert_eq!(m.get(0, 0), 1.0);
    assert_eq!(m.get(1, 0), 3.0);
}
