use mv_matrix::Matrix;

use crate::backend::MatVecBackend;
use crate::engine::MatVecEngine;
use crate::error::Result;
use crate::partition::WorkerCount;

/// Row-block parallel kernel.
///
/// Each call builds a fresh [`MatVecEngine`], so threads are created for the
/// call and joined before it returns.
#[derive(Debug, Clone)]
pub struct ThreadedBackend {
    workers: WorkerCount,
}

impl ThreadedBackend {
    pub fn new(workers: WorkerCount) -> Self {
        ThreadedBackend { workers }
    }

    pub fn workers(&self) -> WorkerCount {
        self.workers
    }
}

impl MatVecBackend for ThreadedBackend {
    fn name(&self) -> &str {
        "threaded"
    }

    fn matvec_into(&self, a: &Matrix, x: &Matrix, y: &mut Matrix) -> Result<()> {
        MatVecEngine::new(self.workers).run(a, x, y)
    }
}
