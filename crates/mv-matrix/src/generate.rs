use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::matrix::Matrix;

/// Seed used by `make_matrix` when none is given.
pub const DEFAULT_SEED: u64 = 1;

/// Upper bound (exclusive) of generated values.
pub const MAX_VALUE: f64 = 10.0;

/// Generate a `rows x cols` matrix of uniform values in `[0, MAX_VALUE)`.
///
/// The same seed always produces the same matrix.
pub fn random_matrix(rows: usize, cols: usize, seed: u64) -> Result<Matrix> {
    let mut m = Matrix::zeros(rows, cols)?;
    let mut rng = StdRng::seed_from_u64(seed);
    for v in m.data_mut() {
        *v = rng.gen_range(0.0..MAX_VALUE);
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_range() {
        let m = random_matrix(8, 5, DEFAULT_SEED).unwrap();
        assert_eq!(m.rows(), 8);
        assert_eq!(m.cols(), 5);
        assert!(m.data().iter().all(|&v| (0.0..MAX_VALUE).contains(&v)));
    }

    #[test]
    fn test_deterministic() {
        let a = random_matrix(4, 4, 42).unwrap();
        let b = random_matrix(4, 4, 42).unwrap();
        let c = random_matrix(4, 4, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
