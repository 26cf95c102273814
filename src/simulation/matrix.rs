//! Small dense matrices backing the neural network weights.
//!
//! Shapes are checked on every binary operation and reported as
//! [`Error::ShapeMismatch`] instead of panicking inside `ndarray`.

use ndarray::{Array2, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// A `rows × cols` grid of `f32` values.
///
/// The shape is fixed at construction. Binary operations come in two forms:
/// associated functions that return a new matrix (`Matrix::add(&a, &b)`) and
/// `*_in_place` methods that overwrite the receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Array2<f32>,
}

impl Matrix {
    /// Creates a zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Builds a column matrix (`values.len() × 1`) from a flat slice.
    pub fn from_array(values: &[f32]) -> Self {
        Self {
            data: Array2::from_shape_fn((values.len(), 1), |(i, _)| values[i]),
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// All rows must have the same length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != cols) {
            return Err(Error::ShapeMismatch {
                op: "from_rows",
                left: (1, cols),
                right: (1, bad.len()),
            });
        }

        Ok(Self {
            data: Array2::from_shape_fn((rows.len(), cols), |(i, j)| rows[i][j]),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Shape as (`rows`, `cols`).
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Returns the entry at (`row`, `col`), or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.data.get((row, col)).copied()
    }

    /// Flattens the matrix in row-major order.
    pub fn to_array(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    /// Overwrites every entry with a uniform sample from `[-1, 1)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.data.mapv_inplace(|_| rng.random_range(-1.0..1.0));
    }

    /// Elementwise sum of two equally shaped matrices.
    pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ensure_same_shape("add", a, b)?;
        Ok(Self {
            data: &a.data + &b.data,
        })
    }

    /// Adds `other` into `self` elementwise.
    pub fn add_in_place(&mut self, other: &Matrix) -> Result<()> {
        ensure_same_shape("add_in_place", self, other)?;
        self.data += &other.data;
        Ok(())
    }

    /// Elementwise difference `a - b` of two equally shaped matrices.
    pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        ensure_same_shape("subtract", a, b)?;
        Ok(Self {
            data: &a.data - &b.data,
        })
    }

    /// Matrix product `a × b`. Requires `a.cols() == b.rows()`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
        if a.cols() != b.rows() {
            return Err(Error::ShapeMismatch {
                op: "multiply",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut result = Array2::zeros((a.rows(), b.cols()));
        for ((i, j), cell) in result.indexed_iter_mut() {
            *cell = (0..a.cols()).map(|k| a.data[[i, k]] * b.data[[k, j]]).sum();
        }

        Ok(Self { data: result })
    }

    /// Elementwise (Hadamard) product, written into `self`.
    pub fn hadamard_in_place(&mut self, other: &Matrix) -> Result<()> {
        ensure_same_shape("hadamard_in_place", self, other)?;
        Zip::from(&mut self.data)
            .and(&other.data)
            .for_each(|a, &b| *a *= b);
        Ok(())
    }

    /// Multiplies every entry by `factor`.
    pub fn scale_in_place(&mut self, factor: f32) {
        self.data *= factor;
    }

    /// Returns the transpose, `result[j][i] = self[i][j]`.
    pub fn transpose(&self) -> Matrix {
        Self {
            data: self.data.t().to_owned(),
        }
    }

    /// Applies `f` to every entry, producing a new matrix.
    pub fn map(&self, f: impl FnMut(f32) -> f32) -> Matrix {
        Self {
            data: self.data.mapv(f),
        }
    }

    /// Applies `f` to every entry in place.
    pub fn map_in_place(&mut self, f: impl FnMut(f32) -> f32) {
        self.data.mapv_inplace(f);
    }

    /// Iterates over entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.data.iter()
    }
}

fn ensure_same_shape(op: &'static str, a: &Matrix, b: &Matrix) -> Result<()> {
    if a.shape() == b.shape() {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            op,
            left: a.shape(),
            right: b.shape(),
        })
    }
}
