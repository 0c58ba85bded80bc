//! `mv-matrix` - Dense matrices and the binary matrix file format for matvec.
//!
//! This crate provides:
//! - A `Matrix` type holding contiguous, row-major f64 data
//! - Dimension checks for matrix-vector products
//! - A reader and writer for the `rows: i32, cols: i32, f64...` file format
//! - A seeded random matrix generator and a plain-text printer

pub mod display;
pub mod error;
pub mod generate;
pub mod io;
pub mod matrix;

// Re-export primary types at the crate root for convenience.
pub use display::format_matrix;
pub use error::{MatrixError, Result};
pub use generate::random_matrix;
pub use io::{read_matrix, write_matrix, MatrixFile, MatrixHeader};
pub use matrix::{check_matvec_dims, Matrix};
