//! Row-per-cell numeric matrices exchanged with the host
//!
//! Every input and output of a grid run is a dense `f64` matrix with one row
//! per grid cell. Storage is a flat `Vec<f64>` in row-major order
//! (`row * cols + col`).

use crate::error::StashError;
use serde::{Deserialize, Serialize};

/// Dense row-major matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unvalidated serialized form
#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = StashError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::from_vec(raw.rows, raw.cols, raw.data)
    }
}

impl Matrix {
    /// Create a matrix of zeros
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Create a matrix with every entry set to `value`
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap row-major data
    ///
    /// # Errors
    /// Returns [`StashError::MalformedMatrix`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, StashError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(StashError::MalformedMatrix {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from equally long rows
    ///
    /// ```
    /// use stash_core::grid::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    /// assert_eq!(m.rows(), 3);
    /// assert_eq!(m.row(1), &[3.0, 4.0]);
    /// ```
    ///
    /// # Errors
    /// Returns [`StashError::MalformedMatrix`] if the rows differ in length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, StashError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let data: Vec<f64> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::from_vec(rows.len(), cols, data)
    }

    /// Number of rows (grid cells)
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow one row
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "Row out of bounds");
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Mutably borrow one row
    ///
    /// # Panics
    /// Panics if `row >= self.rows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        assert!(row < self.rows, "Row out of bounds");
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Value at `(row, col)`
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "Position out of bounds");
        self.data[row * self.cols + col]
    }

    /// Set the value at `(row, col)`
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "Position out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Iterate over rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Row-major storage
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_creation() {
        let m = Matrix::new(4, 3);
        assert_eq!(m.rows(), 4);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.as_slice().len(), 12);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));

        let m = Matrix::filled(2, 2, -9999.0);
        assert!(m.as_slice().iter().all(|&v| v == -9999.0));
    }

    #[test]
    fn test_row_major_layout() {
        let mut m = Matrix::new(2, 3);
        m.set(1, 2, 7.0);
        m.row_mut(0)[1] = 3.0;
        assert_eq!(m.as_slice(), &[0.0, 3.0, 0.0, 0.0, 0.0, 7.0]);
        assert_eq!(m.get(1, 2), 7.0);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        assert_eq!(
            Matrix::from_vec(2, 3, vec![0.0; 5]),
            Err(StashError::MalformedMatrix { rows: 2, cols: 3, len: 5 })
        );
        let ragged: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(Matrix::from_rows(&ragged).is_err());
    }

    #[test]
    fn test_json_is_validated() {
        let m: Matrix = serde_json::from_str(r#"{"rows":1,"cols":2,"data":[1.5,2.5]}"#).unwrap();
        assert_eq!(m.row(0), &[1.5, 2.5]);

        let bad: Result<Matrix, _> = serde_json::from_str(r#"{"rows":2,"cols":2,"data":[1.0]}"#);
        assert!(bad.is_err());

        let text = serde_json::to_string(&m).unwrap();
        assert_eq!(serde_json::from_str::<Matrix>(&text).unwrap(), m);
    }

    #[test]
    #[should_panic(expected = "Row out of bounds")]
    fn test_row_out_of_bounds() {
        let m = Matrix::new(1, 1);
        let _ = m.row(1);
    }
}
