use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Index;

use itertools::Itertools;
use once_cell::sync::OnceCell;

use crate::common::error::TraceError;

/// A dense row-major matrix of arbitrary size.
///
/// Matrices are immutable once built. The determinant and inverse are computed on first use
/// and memoized, the caches are thread-safe so a shared matrix can be queried from any thread.
#[derive(Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,

    determinant: OnceCell<Result<f64, TraceError>>,
    inverse: OnceCell<Result<Box<Matrix>, TraceError>>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, TraceError> {
        if data.len() != rows * cols {
            return Err(TraceError::DimensionMismatch { left: rows * cols, right: data.len() });
        }
        Ok(Self::new_unchecked(rows, cols, data))
    }

    fn new_unchecked(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data, determinant: OnceCell::new(), inverse: OnceCell::new() }
    }

    fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let data = (0..rows).cartesian_product(0..cols).map(|(r, c)| f(r, c)).collect();
        Self::new_unchecked(rows, cols, data)
    }

    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        let data = rows.iter().flatten().copied().collect();
        Self::new_unchecked(rows.len(), N, data)
    }

    pub fn identity(size: usize) -> Self {
        Self::from_fn(size, size, |r, c| if r == c { 1.0 } else { 0.0 })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn transpose(&self) -> Matrix {
        Self::from_fn(self.cols, self.rows, |r, c| self[(c, r)])
    }

    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, TraceError> {
        if self.cols != rhs.rows {
            return Err(TraceError::DimensionMismatch { left: self.cols, right: rhs.rows });
        }
        Ok(Self::from_fn(self.rows, rhs.cols, |r, c| {
            (0..self.cols).map(|i| self[(r, i)] * rhs[(i, c)]).sum()
        }))
    }

    /// Multiply with a column tuple, eg. a homogeneous point or vector.
    pub fn multiply_tuple(&self, tuple: &[f64]) -> Result<Vec<f64>, TraceError> {
        if self.cols != tuple.len() {
            return Err(TraceError::DimensionMismatch { left: self.cols, right: tuple.len() });
        }
        Ok((0..self.rows)
            .map(|r| (0..self.cols).map(|i| self[(r, i)] * tuple[i]).sum())
            .collect())
    }

    pub fn determinant(&self) -> Result<f64, TraceError> {
        *self.determinant.get_or_init(|| self.compute_determinant())
    }

    pub fn is_invertible(&self) -> bool {
        matches!(self.determinant(), Ok(d) if d != 0.0)
    }

    /// The inverse, computed as the transposed cofactor matrix divided by the determinant.
    pub fn inverse(&self) -> Result<&Matrix, TraceError> {
        self.inverse
            .get_or_init(|| self.compute_inverse().map(Box::new))
            .as_deref()
            .map_err(|&e| e)
    }

    fn check_square(&self) -> Result<(), TraceError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(TraceError::NotSquare { rows: self.rows, cols: self.cols })
        }
    }

    fn compute_determinant(&self) -> Result<f64, TraceError> {
        self.check_square()?;

        let det = match self.rows {
            0 => 1.0,
            1 => self[(0, 0)],
            2 => self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)],
            _ => {
                let mut total = 0.0;
                for c in 0..self.cols {
                    total += self[(0, c)] * self.cofactor(0, c)?;
                }
                total
            }
        };
        Ok(det)
    }

    fn compute_inverse(&self) -> Result<Matrix, TraceError> {
        let det = self.determinant()?;
        if det == 0.0 {
            return Err(TraceError::NotInvertible);
        }

        // element [c, r] of the result is cofactor(r, c), note the swapped indices
        let mut data = vec![0.0; self.rows * self.cols];
        for r in 0..self.rows {
            for c in 0..self.cols {
                data[c * self.cols + r] = self.cofactor(r, c)? / det;
            }
        }
        Ok(Self::new_unchecked(self.rows, self.cols, data))
    }

    /// The matrix with `row` and `col` removed.
    fn submatrix(&self, row: usize, col: usize) -> Result<Matrix, TraceError> {
        self.check_square()?;
        if row >= self.rows || col >= self.cols {
            return Err(TraceError::IndexOutOfRange { index: row.max(col), len: self.rows });
        }

        let data = (0..self.rows).filter(|&r| r != row)
            .cartesian_product((0..self.cols).filter(|&c| c != col))
            .map(|(r, c)| self[(r, c)])
            .collect();
        Ok(Self::new_unchecked(self.rows - 1, self.cols - 1, data))
    }

    fn minor(&self, row: usize, col: usize) -> Result<f64, TraceError> {
        self.submatrix(row, col)?.determinant()
    }

    fn cofactor(&self, row: usize, col: usize) -> Result<f64, TraceError> {
        let minor = self.minor(row, col)?;
        if (row + col) % 2 == 1 {
            Ok(-minor)
        } else {
            Ok(minor)
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "index ({}, {}) out of bounds for {}x{} matrix", row, col, self.rows, self.cols);
        &self.data[row * self.cols + col]
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl Debug for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("[\n")?;
            for row in self.data.chunks(self.cols.max(1)) {
                writeln!(f, "    {}", row.iter().map(|x| format!("{:?}", x)).join(", "))?;
            }
            f.write_str("]")
        } else {
            f.debug_struct("Matrix")
                .field("rows", &self.rows)
                .field("cols", &self.cols)
                .field("data", &self.data)
                .finish()
        }
    }
}
