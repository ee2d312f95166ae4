//! Dense 2-D matrix used as the numeric foundation of the network.
//!
//! Thin wrapper over [`ndarray::Array2`] that enforces non-empty shapes and
//! reports non-conformant operands as [`SimulationError::ShapeMismatch`]
//! instead of panicking inside ndarray.

use ndarray::Array2;
use rand::Rng;

use super::error::SimulationError;

/// A `rows × cols` matrix of `f64`.
///
/// The shape is fixed at construction; only the contents change.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Creates a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, SimulationError> {
        check_shape(rows, cols)?;
        Ok(Self {
            data: Array2::zeros((rows, cols)),
        })
    }

    /// Creates a matrix with every cell drawn uniformly from `[-1, 1)`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        check_shape(rows, cols)?;
        Ok(Self {
            data: Array2::from_shape_fn((rows, cols), |_| rng.random_range(-1.0..1.0)),
        })
    }

    /// Builds a matrix from row-major values.
    pub fn from_shape_vec(
        rows: usize,
        cols: usize,
        values: Vec<f64>,
    ) -> Result<Self, SimulationError> {
        check_shape(rows, cols)?;
        let len = values.len();
        let data = Array2::from_shape_vec((rows, cols), values).map_err(|_| {
            SimulationError::ShapeMismatch {
                op: "from_shape_vec",
                left: (rows, cols),
                right: (len, 1),
            }
        })?;
        Ok(Self { data })
    }

    /// Builds a column matrix (`values.len() × 1`).
    pub fn from_vec(values: &[f64]) -> Result<Self, SimulationError> {
        Self::from_shape_vec(values.len(), 1, values.to_vec())
    }

    /// Flattens the matrix in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Returns the cell at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Iterates the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Standard matrix product `a · b`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, SimulationError> {
        if a.cols() != b.rows() {
            return Err(SimulationError::ShapeMismatch {
                op: "multiply",
                left: a.shape(),
                right: b.shape(),
            });
        }
        Ok(Matrix {
            data: a.data.dot(&b.data),
        })
    }

    /// Adds `other` elementwise in place.
    pub fn add(&mut self, other: &Matrix) -> Result<(), SimulationError> {
        if self.shape() != other.shape() {
            return Err(SimulationError::ShapeMismatch {
                op: "add",
                left: self.shape(),
                right: other.shape(),
            });
        }
        self.data += &other.data;
        Ok(())
    }

    /// Adds `value` to every cell in place.
    pub fn add_scalar(&mut self, value: f64) {
        self.data += value;
    }

    /// Applies `f` to every cell in place.
    pub fn map(&mut self, f: impl FnMut(f64) -> f64) {
        self.data.mapv_inplace(f);
    }

    /// Uniform crossover: each cell is copied from `a` or `b` with equal probability.
    pub fn crossover<R: Rng + ?Sized>(
        a: &Matrix,
        b: &Matrix,
        rng: &mut R,
    ) -> Result<Matrix, SimulationError> {
        if a.shape() != b.shape() {
            return Err(SimulationError::ShapeMismatch {
                op: "crossover",
                left: a.shape(),
                right: b.shape(),
            });
        }
        let data = Array2::from_shape_fn(a.shape(), |idx| {
            if rng.random_bool(0.5) { a.data[idx] } else { b.data[idx] }
        });
        Ok(Matrix { data })
    }
}

fn check_shape(rows: usize, cols: usize) -> Result<(), SimulationError> {
    if rows == 0 || cols == 0 {
        return Err(SimulationError::EmptyMatrix { rows, cols });
    }
    Ok(())
}
