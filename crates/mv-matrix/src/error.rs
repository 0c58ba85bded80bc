use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid matrix dimensions {rows} x {cols}: both must be positive")]
    InvalidDimension { rows: i64, cols: i64 },
    #[error("truncated matrix file: expected {expected} bytes, got {got}")]
    Truncated { expected: u64, got: u64 },
    #[error("x must be a column vector (cols == 1), found {rows} x {cols}")]
    NotColumnVector { rows: usize, cols: usize },
    #[error(
        "incompatible dimensions for multiplication: \
         matrix A is {a_rows} x {a_cols}, vector x is {x_rows} x {x_cols}"
    )]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        x_rows: usize,
        x_cols: usize,
    },
    #[error("data length {got} does not match {expected} elements")]
    LengthMismatch { expected: usize, got: usize },
    #[error("memory allocation failed for {elements} elements")]
    Allocation { elements: usize },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
