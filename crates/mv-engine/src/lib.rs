//! `mv-engine` - Parallel dense matrix-vector multiplication for matvec.
//!
//! This crate provides:
//! - Row-block partitioning shared by every parallel phase
//! - A thread-per-task dispatcher with join-then-fail error handling
//! - A NUMA first-touch placement phase
//! - A `MatVecBackend` trait with serial and threaded kernels
//! - Timing and an orchestrator that runs a whole file-to-file multiply

pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod first_touch;
pub mod partition;
pub mod pool;
pub mod run;
pub mod serial;
pub mod threaded;
pub mod timing;

// Re-export primary types at the crate root for convenience.
pub use backend::MatVecBackend;
pub use config::{Mode, RunConfig};
pub use engine::{EngineState, MatVecContext, MatVecEngine};
pub use error::{EngineError, Result};
pub use first_touch::{first_touch, load_placed};
pub use partition::{
    block_high, block_low, block_owner, block_size, partitions, BlockPartition, WorkerCount,
    WorkerIndex,
};
pub use pool::{dispatch, Phase};
pub use run::{run, run_timed, RunReport};
pub use serial::SerialBackend;
pub use threaded::ThreadedBackend;
pub use timing::{Stopwatch, Timings};
