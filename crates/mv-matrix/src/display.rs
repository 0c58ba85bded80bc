use std::fmt::Write;

use crate::matrix::Matrix;

/// Render a matrix as text, one line per row.
///
/// Each value is printed zero-padded to five characters with two decimals
/// (`07.50`) and followed by a single space.
pub fn format_matrix(matrix: &Matrix) -> String {
    let mut out = String::with_capacity(matrix.numel() * 6 + matrix.rows());
    for i in 0..matrix.rows() {
        for v in matrix.row(i) {
            // Writing to a String cannot fail.
            let _ = write!(out, "{:05.2} ", v);
        }
        out.push('\n');
    }
    out
}
