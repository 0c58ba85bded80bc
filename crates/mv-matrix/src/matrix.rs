use std::alloc::{self, Layout};
use std::fmt;

use crate::error::{MatrixError, Result};

/// A dense matrix of f64 values in row-major order.
///
/// Element `(i, j)` lives at offset `i * cols + j`. A vector is a matrix with
/// a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(MatrixError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Create a column vector (`len x 1`) from its elements.
    pub fn column(data: Vec<f64>) -> Self {
        Matrix {
            rows: data.len(),
            cols: 1,
            data,
        }
    }

    /// Create a zero-filled matrix.
    ///
    /// The backing pages come straight from a zeroing allocation and are not
    /// written here, so the first thread to store into them decides their
    /// placement under a first-touch policy.
    ///
    /// # Errors
    /// Returns `Allocation` if the buffer cannot be allocated.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let n = rows
            .checked_mul(cols)
            .ok_or(MatrixError::Allocation { elements: usize::MAX })?;
        Ok(Matrix {
            rows,
            cols,
            data: try_zeroed(n)?,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this matrix has exactly one column.
    pub fn is_column_vector(&self) -> bool {
        self.cols == 1
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the matrix, returning its row-major data.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.rows, self.cols)
    }
}

/// Validate the operands of `y = A * x` from their dimensions alone.
///
/// `x` must be a column vector and `A.cols` must equal `x.rows`. Callers run
/// this on file headers, before any data buffer exists.
pub fn check_matvec_dims(a_rows: usize, a_cols: usize, x_rows: usize, x_cols: usize) -> Result<()> {
    if x_cols != 1 {
        return Err(MatrixError::NotColumnVector {
            rows: x_rows,
            cols: x_cols,
        });
    }
    if a_cols != x_rows {
        return Err(MatrixError::DimensionMismatch {
            a_rows,
            a_cols,
            x_rows,
            x_cols,
        });
    }
    Ok(())
}

/// Allocate `len` zeroed f64 values without aborting on allocation failure.
pub(crate) fn try_zeroed(len: usize) -> Result<Vec<f64>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    let layout = Layout::array::<f64>(len).map_err(|_| MatrixError::Allocation { elements: len })?;
    // SAFETY: `layout` has a non-zero size.
    let ptr = unsafe { alloc::alloc_zeroed(layout) } as *mut f64;
    if ptr.is_null() {
        return Err(MatrixError::Allocation { elements: len });
    }
    // SAFETY: `ptr` comes from the global allocator with the layout of
    // `[f64; len]`, and all-zero bits are a valid `0.0` for every element.
    Ok(unsafe { Vec::from_raw_parts(ptr, len, len) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix() {
        let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.numel(), 6);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert!(!m.is_column_vector());
    }

    #[test]
    fn test_new_length_mismatch() {
        let err = Matrix::new(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::LengthMismatch {
                expected: 4,
                got: 3
            }
        ));
    }

    #[test]
    fn test_column() {
        let v = Matrix::column(vec![5.0, 6.0]);
        assert_eq!(v.rows(), 2);
        assert!(v.is_column_vector());
        assert_eq!(v.to_string(), "2 x 1");
    }

    #[test]
    fn test_zeros() {
        let z = Matrix::zeros(3, 2).unwrap();
        assert_eq!(z.data(), &[0.0; 6]);

        let empty = Matrix::zeros(0, 4).unwrap();
        assert_eq!(empty.numel(), 0);
    }

    #[test]
    fn test_zeros_overflow() {
        assert!(matches!(
            Matrix::zeros(usize::MAX, 2),
            Err(MatrixError::Allocation { .. })
        ));
    }

    #[test]
    fn test_zeros_too_large() {
        // Exceeds isize::MAX bytes, so the layout itself is rejected.
        assert!(matches!(
            Matrix::zeros(usize::MAX / 8, 1),
            Err(MatrixError::Allocation { .. })
        ));
    }

    #[test]
    fn test_data_mut() {
        let mut m = Matrix::zeros(1, 2).unwrap();
        m.data_mut()[1] = 42.0;
        assert_eq!(m.into_data(), vec![0.0, 42.0]);
    }

    #[test]
    fn test_check_dims_ok() {
        assert!(check_matvec_dims(4, 3, 3, 1).is_ok());
    }

    #[test]
    fn test_check_dims_not_column() {
        let err = check_matvec_dims(2, 2, 2, 3).unwrap_err();
        assert!(matches!(err, MatrixError::NotColumnVector { rows: 2, cols: 3 }));
    }

    #[test]
    fn test_check_dims_mismatch() {
        let err = check_matvec_dims(2, 3, 4, 1).unwrap_err();
        assert!(matches!(err, MatrixError::DimensionMismatch { .. }));
        let msg = err.to_string();
        assert!(msg.contains("2 x 3"));
        assert!(msg.contains("4 x 1"));
    }
}
