use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::matrix::Matrix;
use super::header::MatrixHeader;

/// Write a matrix in the binary format to any writer.
///
/// The header goes first, followed by every element as a little-endian f64
/// in row-major order.
pub fn write_to(writer: &mut impl Write, matrix: &Matrix) -> Result<()> {
    let header = MatrixHeader::new(matrix.rows(), matrix.cols())?;
    header.write(writer)?;
    for v in matrix.data() {
        writer.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write `matrix` to it.
pub fn write_matrix(path: &Path, matrix: &Matrix) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, matrix)?;
    writer.flush()?;
    Ok(())
}
