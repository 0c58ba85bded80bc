use mv_matrix::{check_matvec_dims, Matrix};

use crate::backend::MatVecBackend;
use crate::engine::{check_output, dot};
use crate::error::Result;

/// Single-threaded reference kernel.
#[derive(Debug, Clone, Default)]
pub struct SerialBackend;

impl SerialBackend {
    pub fn new() -> Self {
        SerialBackend
    }
}

impl MatVecBackend for SerialBackend {
    fn name(&self) -> &str {
        "serial"
    }

    fn matvec_into(&self, a: &Matrix, x: &Matrix, y: &mut Matrix) -> Result<()> {
        check_matvec_dims(a.rows(), a.cols(), x.rows(), x.cols())?;
        check_output(a.rows(), y)?;

        let xs = x.data();
        for (i, out) in y.data_mut().iter_mut().enumerate() {
            *out = dot(a.row(i), xs);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use mv_matrix::MatrixError;

    #[test]
    fn test_matvec() {
        let a = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let x = Matrix::column(vec![5.0, 6.0]);
        let y = SerialBackend::new().matvec(&a, &x).unwrap();
        assert_eq!(y.rows(), 2);
        assert_eq!(y.cols(), 1);
        assert_eq!(y.data(), &[17.0, 39.0]);
    }

    #[test]
    fn test_identity() {
        let a = Matrix::new(3, 3, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        let x = Matrix::column(vec![0.5, -1.5, 8.0]);
        assert_eq!(SerialBackend::new().matvec(&a, &x).unwrap(), x);
    }

    #[test]
    fn test_mismatch() {
        let a = Matrix::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let x = Matrix::column(vec![1.0, 2.0]);
        assert!(matches!(
            SerialBackend::new().matvec(&a, &x),
            Err(EngineError::Matrix(MatrixError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_name() {
        assert_eq!(SerialBackend::new().name(), "serial");
    }
}
