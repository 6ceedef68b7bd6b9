use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use serde::{Deserialize, Serialize};

/// Fixed-size sequence of `f64`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Allocate a vector of `size` zeros.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size],
        }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`Vector::len`].
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, i: usize) -> f64 {
        self.data[i]
    }

    pub fn set(&mut self, i: usize, value: f64) {
        self.data[i] = value;
    }

    pub fn set_all(&mut self, value: f64) {
        self.data.fill(value);
    }

    pub fn zero(&mut self) {
        self.set_all(0.0);
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, f64> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        assert_eq!(
            self.len(),
            other.len(),
            "Dot product requires equal length vectors"
        );
        self.iter().zip(other.iter()).map(|(a, b)| a * b).sum()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl From<ndarray::Array1<f64>> for Vector {
    fn from(value: ndarray::Array1<f64>) -> Self {
        Vector::from_vec(value.to_vec())
    }
}

impl From<&Vector> for ndarray::Array1<f64> {
    fn from(value: &Vector) -> Self {
        ndarray::Array1::from(value.to_vec())
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
