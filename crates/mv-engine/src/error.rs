use thiserror::Error;

use mv_matrix::MatrixError;

use crate::engine::EngineState;
use crate::pool::Phase;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("thread count must be positive, got {0}")]
    InvalidThreadCount(usize),
    #[error("failed to spawn {phase} worker {worker}: {source}")]
    ThreadSpawn {
        phase: Phase,
        worker: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("{phase} worker {worker} panicked")]
    WorkerPanicked { phase: Phase, worker: usize },
    #[error("engine is {got}, expected {expected}")]
    InvalidState {
        expected: EngineState,
        got: EngineState,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
