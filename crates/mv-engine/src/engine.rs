use std::fmt;

use mv_matrix::{check_matvec_dims, Matrix, MatrixError};

use crate::error::{EngineError, Result};
use crate::partition::{partitions, split_rows_mut, BlockPartition, WorkerCount};
use crate::pool::{dispatch, Phase};

/// Lifecycle of a [`MatVecEngine`]. An engine runs at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Created,
    Running,
    Joined,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Created => write!(f, "created"),
            EngineState::Running => write!(f, "running"),
            EngineState::Joined => write!(f, "joined"),
        }
    }
}

/// Read-only operands shared by every compute worker.
#[derive(Debug, Clone, Copy)]
pub struct MatVecContext<'a> {
    a: &'a Matrix,
    x: &'a Matrix,
}

impl<'a> MatVecContext<'a> {
    /// Bundle `a` and `x` after checking that `a * x` is defined.
    pub fn new(a: &'a Matrix, x: &'a Matrix) -> Result<Self> {
        check_matvec_dims(a.rows(), a.cols(), x.rows(), x.cols())?;
        Ok(MatVecContext { a, x })
    }

    /// Compute the rows of `y` in `part`. `y_rows` holds exactly those rows.
    fn compute_rows(&self, part: BlockPartition, y_rows: &mut [f64]) {
        let x = self.x.data();
        for (row, out) in part.rows().zip(y_rows.iter_mut()) {
            *out = dot(self.a.row(row), x);
        }
    }
}

/// Dot product accumulated left to right in f64.
///
/// Every kernel uses this so the result does not depend on the thread count.
#[inline]
pub(crate) fn dot(row: &[f64], x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (a, b) in row.iter().zip(x) {
        sum += a * b;
    }
    sum
}

/// Check that `y` can receive the product of an `a_rows`-row matrix.
pub(crate) fn check_output(a_rows: usize, y: &Matrix) -> Result<()> {
    if !y.is_column_vector() || y.rows() != a_rows {
        return Err(MatrixError::LengthMismatch {
            expected: a_rows,
            got: y.numel(),
        }
        .into());
    }
    Ok(())
}

/// Row-block parallel `y = A * x`.
///
/// Each of the configured workers computes its own block of rows of `y`
/// with no synchronization beyond the final join. The engine moves from
/// `Created` to `Running` to `Joined` and cannot be run again.
#[derive(Debug)]
pub struct MatVecEngine {
    workers: WorkerCount,
    state: EngineState,
}

impl MatVecEngine {
    pub fn new(workers: WorkerCount) -> Self {
        MatVecEngine {
            workers,
            state: EngineState::Created,
        }
    }

    pub fn workers(&self) -> WorkerCount {
        self.workers
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Compute `y = a * x` into `y`, which must be an `a.rows() x 1` vector.
    ///
    /// Any thread-creation failure or worker panic fails the whole run; the
    /// contents of `y` are unspecified in that case.
    pub fn run(&mut self, a: &Matrix, x: &Matrix, y: &mut Matrix) -> Result<()> {
        if self.state != EngineState::Created {
            return Err(EngineError::InvalidState {
                expected: EngineState::Created,
                got: self.state,
            });
        }
        let ctx = MatVecContext::new(a, x)?;
        check_output(a.rows(), y)?;

        self.state = EngineState::Running;
        tracing::debug!(rows = a.rows(), cols = a.cols(), workers = self.workers.get(), "compute start");

        let parts = partitions(self.workers, a.rows());
        let chunks = split_rows_mut(y.data_mut(), &parts, 1);
        let tasks: Vec<_> = parts.into_iter().zip(chunks).collect();

        let result = dispatch(Phase::Compute, tasks, |worker, (part, y_rows)| {
            tracing::trace!(
                %worker,
                first_row = part.first_row(),
                last_row = ?part.last_row(),
                "compute block"
            );
            ctx.compute_rows(part, y_rows);
        });

        // dispatch has joined every worker it started, even on failure.
        self.state = EngineState::Joined;
        result
    }
}
