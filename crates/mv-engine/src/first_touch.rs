//! NUMA first-touch placement.
//!
//! Under a first-touch policy a page lands on the memory node of the thread
//! that first writes it. Running this phase before compute makes each
//! worker the first writer of the rows of A and y it will later compute,
//! and of its share of x. Whether placement actually improves is up to the
//! host; nothing here verifies it.
//!
//! [`load_placed`] is the form used by a run: operands are allocated
//! untouched and each worker decodes its own blocks straight from the
//! mapped files. [`first_touch`] works on buffers that are already loaded
//! and stores back the value just read, so it never changes a number and
//! can be skipped or repeated without affecting the result.

use std::hint::black_box;

use mv_matrix::{check_matvec_dims, Matrix, MatrixFile};

use crate::engine::check_output;
use crate::error::Result;
use crate::partition::{partitions, split_rows_mut, WorkerCount};
use crate::pool::{dispatch, Phase};

/// Blocks of each operand owned by one worker during placement.
struct TouchTask<'a> {
    a_rows: &'a mut [f64],
    /// Element index of `a_rows[0]` within A.
    a_first: usize,
    y_rows: &'a mut [f64],
    x_part: &'a mut [f64],
    /// Element index of `x_part[0]` within x.
    x_first: usize,
}

/// Split the operands into per-worker blocks.
///
/// A and y use the same row blocks the compute phase uses; x is split with
/// the same scheme over its own length.
fn touch_tasks<'a>(
    a: &'a mut Matrix,
    x: &'a mut Matrix,
    y: &'a mut Matrix,
    workers: WorkerCount,
) -> Result<Vec<TouchTask<'a>>> {
    check_matvec_dims(a.rows(), a.cols(), x.rows(), x.cols())?;
    check_output(a.rows(), y)?;

    let row_parts = partitions(workers, a.rows());
    let x_parts = partitions(workers, x.rows());
    let a_cols = a.cols();
    tracing::debug!(workers = workers.get(), rows = a.rows(), cols = a_cols, "first-touch start");

    let tasks = split_rows_mut(a.data_mut(), &row_parts, a_cols)
        .into_iter()
        .zip(split_rows_mut(y.data_mut(), &row_parts, 1))
        .zip(split_rows_mut(x.data_mut(), &x_parts, 1))
        .zip(row_parts.iter().zip(&x_parts))
        .map(|(((a_rows, y_rows), x_part), (row_part, x_block))| TouchTask {
            a_rows,
            a_first: row_part.first_row() * a_cols,
            y_rows,
            x_part,
            x_first: x_block.first_row(),
        })
        .collect();
    Ok(tasks)
}

/// Touch every element of `a`, `x` and `y` from the worker that owns it.
///
/// Returns after every worker has been joined.
pub fn first_touch(a: &mut Matrix, x: &mut Matrix, y: &mut Matrix, workers: WorkerCount) -> Result<()> {
    let tasks = touch_tasks(a, x, y, workers)?;
    dispatch(Phase::FirstTouch, tasks, |worker, task| {
        tracing::trace!(
            %worker,
            a_elems = task.a_rows.len(),
            y_elems = task.y_rows.len(),
            x_elems = task.x_part.len(),
            "touch block"
        );
        touch(task.a_rows);
        touch(task.y_rows);
        touch(task.x_part);
    })
}

/// Allocate A, x and y untouched and let each worker write its own blocks.
///
/// Worker `r` decodes its rows of A and its block of x from the mapped
/// files and zero-fills its rows of y, so every page's first writer is the
/// worker that computes on it. Returns `(a, x, y)` after every worker has
/// been joined.
pub fn load_placed(
    a_file: &MatrixFile,
    x_file: &MatrixFile,
    workers: WorkerCount,
) -> Result<(Matrix, Matrix, Matrix)> {
    check_matvec_dims(a_file.rows(), a_file.cols(), x_file.rows(), x_file.cols())?;
    let mut a = a_file.alloc_matrix()?;
    let mut x = x_file.alloc_matrix()?;
    let mut y = Matrix::zeros(a.rows(), 1)?;

    let tasks = touch_tasks(&mut a, &mut x, &mut y, workers)?;
    dispatch(Phase::FirstTouch, tasks, |worker, task| {
        tracing::trace!(
            %worker,
            a_first = task.a_first,
            a_elems = task.a_rows.len(),
            x_first = task.x_first,
            x_elems = task.x_part.len(),
            "decode block"
        );
        a_file.decode_into(task.a_first, task.a_rows);
        x_file.decode_into(task.x_first, task.x_part);
        task.y_rows.fill(0.0);
    })?;
    Ok((a, x, y))
}

/// Read each element and store it back.
fn touch(values: &mut [f64]) {
    for v in values.iter_mut() {
        *v = black_box(*v);
    }
}
