use std::io::{Read, Write};

use crate::error::{MatrixError, Result};

/// Size of the on-disk header: `rows` and `cols` as little-endian i32.
pub const HEADER_BYTES: usize = 8;

/// Size of one stored element (a little-endian f64).
pub const ELEMENT_BYTES: usize = 8;

/// Parsed matrix file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixHeader {
    pub rows: usize,
    pub cols: usize,
}

impl MatrixHeader {
    /// Create a header, checking that both dimensions are positive and fit
    /// the on-disk i32 fields.
    pub fn new(rows: usize, cols: usize) -> Result<MatrixHeader> {
        let fits = |d: usize| d > 0 && d <= i32::MAX as usize;
        if !fits(rows) || !fits(cols) {
            return Err(MatrixError::InvalidDimension {
                rows: rows as i64,
                cols: cols as i64,
            });
        }
        MatrixHeader::checked(rows, cols)
    }

    /// Reject shapes whose file size is not addressable, so that `numel`,
    /// `payload_bytes` and `file_bytes` cannot overflow.
    fn checked(rows: usize, cols: usize) -> Result<MatrixHeader> {
        rows.checked_mul(cols)
            .and_then(|n| n.checked_mul(ELEMENT_BYTES))
            .and_then(|b| b.checked_add(HEADER_BYTES))
            .ok_or(MatrixError::InvalidDimension {
                rows: rows as i64,
                cols: cols as i64,
            })?;
        Ok(MatrixHeader { rows, cols })
    }

    /// Decode a header from its 8 raw bytes.
    ///
    /// Zero or negative dimensions are rejected.
    pub fn from_bytes(bytes: [u8; HEADER_BYTES]) -> Result<MatrixHeader> {
        let rows = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let cols = i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if rows <= 0 || cols <= 0 {
            return Err(MatrixError::InvalidDimension {
                rows: rows as i64,
                cols: cols as i64,
            });
        }
        MatrixHeader::checked(rows as usize, cols as usize)
    }

    /// Parse a header from the beginning of a reader.
    pub fn parse(reader: &mut impl Read) -> Result<MatrixHeader> {
        let mut buf = [0u8; HEADER_BYTES];
        reader.read_exact(&mut buf)?;
        MatrixHeader::from_bytes(buf)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_BYTES] {
        let mut out = [0u8; HEADER_BYTES];
        out[..4].copy_from_slice(&(self.rows as i32).to_le_bytes());
        out[4..].copy_from_slice(&(self.cols as i32).to_le_bytes());
        out
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Number of elements described by this header.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of payload bytes following the header.
    pub fn payload_bytes(&self) -> u64 {
        (self.numel() * ELEMENT_BYTES) as u64
    }

    /// Size of a complete file: header plus payload.
    pub fn file_bytes(&self) -> u64 {
        HEADER_BYTES as u64 + self.payload_bytes()
    }
}
