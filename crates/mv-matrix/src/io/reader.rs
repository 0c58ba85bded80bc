use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{MatrixError, Result};
use crate::matrix::{try_zeroed, Matrix};
use super::header::{MatrixHeader, ELEMENT_BYTES, HEADER_BYTES};

/// A matrix file backed by a memory-mapped region.
///
/// Opening parses and validates the header and checks that the payload is
/// complete, but does not decode or copy any element. This lets callers
/// validate the dimensions of several operands before allocating anything.
pub struct MatrixFile {
    header: MatrixHeader,
    mmap: Mmap,
}

impl MatrixFile {
    /// Open and validate a matrix file.
    ///
    /// Fails with `Io` if the file cannot be opened or mapped, with
    /// `InvalidDimension` for a zero or negative dimension, and with
    /// `Truncated` if the file is shorter than its header declares.
    /// Trailing bytes past the declared payload are ignored.
    pub fn open(path: &Path) -> Result<MatrixFile> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        if len < HEADER_BYTES as u64 {
            return Err(MatrixError::Truncated {
                expected: HEADER_BYTES as u64,
                got: len,
            });
        }

        // SAFETY: the mapping is read-only and the file is not modified
        // while this handle is alive.
        let mmap = unsafe { Mmap::map(&file)? };

        let mut raw = [0u8; HEADER_BYTES];
        raw.copy_from_slice(&mmap[..HEADER_BYTES]);
        let header = MatrixHeader::from_bytes(raw)?;

        let expected = header.file_bytes();
        if (mmap.len() as u64) < expected {
            return Err(MatrixError::Truncated {
                expected,
                got: mmap.len() as u64,
            });
        }

        Ok(MatrixFile { header, mmap })
    }

    pub fn header(&self) -> MatrixHeader {
        self.header
    }

    pub fn rows(&self) -> usize {
        self.header.rows
    }

    pub fn cols(&self) -> usize {
        self.header.cols
    }

    /// Raw little-endian payload bytes (exactly `rows * cols * 8`).
    pub fn payload(&self) -> &[u8] {
        let end = HEADER_BYTES + self.header.numel() * ELEMENT_BYTES;
        &self.mmap[HEADER_BYTES..end]
    }

    /// Allocate a zero-filled matrix of this file's shape without decoding.
    ///
    /// The pages stay untouched, so whichever thread later decodes a block
    /// with [`decode_into`](Self::decode_into) is their first writer.
    ///
    /// # Errors
    /// Returns `Allocation` if the element buffer cannot be allocated.
    pub fn alloc_matrix(&self) -> Result<Matrix> {
        Matrix::zeros(self.header.rows, self.header.cols)
    }

    /// Decode `out.len()` elements starting at element index `first`.
    ///
    /// # Panics
    /// Panics if `first + out.len()` exceeds the element count.
    pub fn decode_into(&self, first: usize, out: &mut [f64]) {
        let start = first * ELEMENT_BYTES;
        let end = start + out.len() * ELEMENT_BYTES;
        decode_f64(&self.payload()[start..end], out);
    }

    /// Allocate a matrix and decode the payload into it.
    ///
    /// # Errors
    /// Returns `Allocation` if the element buffer cannot be allocated.
    pub fn to_matrix(&self) -> Result<Matrix> {
        let mut data = try_zeroed(self.header.numel())?;
        decode_f64(self.payload(), &mut data);
        Matrix::new(self.header.rows, self.header.cols, data)
    }
}

/// Open a matrix file and load it in one step.
pub fn read_matrix(path: &Path) -> Result<Matrix> {
    MatrixFile::open(path)?.to_matrix()
}

/// Reinterpret little-endian bytes as f64 values.
fn decode_f64(raw: &[u8], out: &mut [f64]) {
    for (dst, chunk) in out.iter_mut().zip(raw.chunks_exact(ELEMENT_BYTES)) {
        let mut bytes = [0u8; ELEMENT_BYTES];
        bytes.copy_from_slice(chunk);
        *dst = f64::from_le_bytes(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f.flush().unwrap();
        f
    }

    fn encode(rows: i32, cols: i32, values: &[f64]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&rows.to_le_bytes());
        out.extend_from_slice(&cols.to_le_bytes());
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_read_matrix() {
        let f = file_with(&encode(2, 2, &[1.0, 2.0, 3.0, 4.0]));
        let m = read_matrix(f.path()).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.data(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_open_exposes_header_only() {
        let f = file_with(&encode(3, 1, &[7.0, 8.0, 9.0]));
        let mf = MatrixFile::open(f.path()).unwrap();
        assert_eq!(mf.header(), MatrixHeader { rows: 3, cols: 1 });
        assert_eq!(mf.payload().len(), 24);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_matrix(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, MatrixError::Io(_)));
    }

    #[test]
    fn test_empty_file() {
        let f = file_with(&[]);
        assert!(matches!(
            MatrixFile::open(f.path()),
            Err(MatrixError::Truncated { expected: 8, got: 0 })
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = encode(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        bytes.truncate(bytes.len() - 3);
        let f = file_with(&bytes);
        match MatrixFile::open(f.path()) {
            Err(MatrixError::Truncated { expected, got }) => {
                assert_eq!(expected, 40);
                assert_eq!(got, 37);
            }
            other => panic!("expected Truncated, got {:?}", other.map(|m| m.header())),
        }
    }

    #[test]
    fn test_huge_header_without_payload() {
        let f = file_with(&encode(i32::MAX, i32::MAX, &[]));
        assert!(matches!(
            MatrixFile::open(f.path()),
            Err(MatrixError::InvalidDimension { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_large_header_without_payload_is_truncated() {
        let f = file_with(&encode(i32::MAX, 4, &[]));
        match MatrixFile::open(f.path()) {
            Err(MatrixError::Truncated { expected, got }) => {
                assert_eq!(expected, 8 + i32::MAX as u64 * 32);
                assert_eq!(got, 8);
            }
            other => panic!("expected Truncated, got {:?}", other.map(|m| m.header())),
        }
    }

    #[test]
    fn test_decode_into_blocks() {
        let f = file_with(&encode(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        let mf = MatrixFile::open(f.path()).unwrap();
        let mut m = mf.alloc_matrix().unwrap();
        assert_eq!(m.data(), &[0.0; 6]);

        let (head, tail) = m.data_mut().split_at_mut(2);
        mf.decode_into(2, tail);
        mf.decode_into(0, head);
        assert_eq!(m, mf.to_matrix().unwrap());
    }

    #[test]
    fn test_negative_dimension() {
        let f = file_with(&encode(-1, 2, &[]));
        assert!(matches!(
            MatrixFile::open(f.path()),
            Err(MatrixError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = encode(1, 2, &[0.5, -0.25]);
        bytes.extend_from_slice(&[0xAA; 5]);
        let f = file_with(&bytes);
        let m = read_matrix(f.path()).unwrap();
        assert_eq!(m.data(), &[0.5, -0.25]);
    }
}
