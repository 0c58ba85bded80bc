use std::fmt::Debug;

use mv_matrix::Matrix;

use crate::error::Result;

/// Trait for interchangeable matrix-vector kernels (serial, threaded).
///
/// Every implementation must produce bit-identical results for the same
/// operands: row `i` of the output is the left-to-right f64 sum of
/// `a[i][j] * x[j]` over ascending `j`.
pub trait MatVecBackend: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "serial", "threaded").
    fn name(&self) -> &str;

    /// Compute `y = a * x` into an existing `a.rows() x 1` vector.
    ///
    /// - `a`: row-major matrix of shape [m, k]
    /// - `x`: column vector of shape [k, 1]
    /// - `y`: column vector of shape [m, 1]; previous contents are overwritten
    fn matvec_into(&self, a: &Matrix, x: &Matrix, y: &mut Matrix) -> Result<()>;

    /// Compute `y = a * x`, allocating the output.
    fn matvec(&self, a: &Matrix, x: &Matrix) -> Result<Matrix> {
        let mut y = Matrix::zeros(a.rows(), 1)?;
        self.matvec_into(a, x, &mut y)?;
        Ok(y)
    }
}
