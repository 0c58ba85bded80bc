use mv_matrix::{check_matvec_dims, write_matrix, Matrix, MatrixFile};

use crate::backend::MatVecBackend;
use crate::config::RunConfig;
use crate::error::Result;
use crate::first_touch::load_placed;
use crate::serial::SerialBackend;
use crate::threaded::ThreadedBackend;
use crate::timing::{Stopwatch, Timings};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Rows of A (and of y).
    pub rows: usize,
    /// Columns of A (and rows of x).
    pub cols: usize,
    /// Name of the kernel that computed y.
    pub backend: String,
    pub timings: Timings,
}

/// Load A and x, compute `y = A * x`, and write y.
///
/// Both headers are read and checked before any element buffer is
/// allocated, so a shape error leaves no output file behind. In
/// first-touch mode the operands are loaded by the placement phase, before
/// the timed compute phase. The overall time starts here; use
/// [`run_timed`] to include work done before the call.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    run_timed(config, Stopwatch::start())
}

/// As [`run`], with the overall time measured from `started`.
pub fn run_timed(config: &RunConfig, started: Stopwatch) -> Result<RunReport> {
    config.validate()?;
    let workers = config.mode.workers()?;

    let a_file = MatrixFile::open(&config.a_path)?;
    let x_file = MatrixFile::open(&config.x_path)?;
    check_matvec_dims(a_file.rows(), a_file.cols(), x_file.rows(), x_file.cols())?;
    tracing::info!(
        a_rows = a_file.rows(),
        a_cols = a_file.cols(),
        x_rows = x_file.rows(),
        "operands validated"
    );

    let (a, x, mut y) = match workers {
        Some(workers) if config.mode.first_touch() => {
            let _span = tracing::info_span!("first_touch", workers = workers.get()).entered();
            let sw = Stopwatch::start();
            let loaded = load_placed(&a_file, &x_file, workers)?;
            tracing::info!(elapsed_ms = sw.elapsed().as_secs_f64() * 1e3, "first-touch done");
            loaded
        }
        _ => {
            let _span = tracing::info_span!("load").entered();
            let a = a_file.to_matrix()?;
            let x = x_file.to_matrix()?;
            let y = Matrix::zeros(a.rows(), 1)?;
            (a, x, y)
        }
    };
    drop((a_file, x_file));

    let backend: Box<dyn MatVecBackend> = match workers {
        Some(workers) => Box::new(ThreadedBackend::new(workers)),
        None => Box::new(SerialBackend::new()),
    };

    let compute = {
        let _span = tracing::info_span!("compute", backend = backend.name()).entered();
        let sw = Stopwatch::start();
        backend.matvec_into(&a, &x, &mut y)?;
        let elapsed = sw.elapsed();
        tracing::info!(elapsed_ms = elapsed.as_secs_f64() * 1e3, "compute done");
        elapsed
    };

    {
        let _span = tracing::info_span!("write").entered();
        write_matrix(&config.y_path, &y)?;
        tracing::info!(path = %config.y_path.display(), rows = y.rows(), "result written");
    }

    let (rows, cols) = (a.rows(), a.cols());
    drop((a, x, y));

    Ok(RunReport {
        rows,
        cols,
        backend: backend.name().to_string(),
        timings: Timings {
            overall: started.elapsed(),
            compute,
        },
    })
}
