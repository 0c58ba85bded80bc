use std::fmt;
use std::io;
use std::thread;

use crate::error::{EngineError, Result};
use crate::partition::WorkerIndex;

/// The parallel phases of a run. Used for thread names and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FirstTouch,
    Compute,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::FirstTouch => write!(f, "first-touch"),
            Phase::Compute => write!(f, "compute"),
        }
    }
}

/// Run one thread per task and wait for all of them.
///
/// Task `i` runs on a fresh thread named `mv-<phase>-<i>` and receives
/// `WorkerIndex(i)`. The call returns only after every spawned thread has
/// been joined.
///
/// If spawning any thread fails, no further threads are started, the ones
/// already running are joined, and `ThreadSpawn` is returned. A panicking
/// worker is reported as `WorkerPanicked` once all workers have been joined.
pub fn dispatch<T, F>(phase: Phase, tasks: Vec<T>, work: F) -> Result<()>
where
    T: Send,
    F: Fn(WorkerIndex, T) + Sync,
{
    dispatch_with(phase, tasks, work, |worker| {
        Ok(thread::Builder::new().name(format!("mv-{}-{}", phase, worker.get())))
    })
}

/// [`dispatch`] with the thread builder for each worker supplied by
/// `make_builder`. An `Err` from `make_builder` counts as a spawn failure.
pub(crate) fn dispatch_with<T, F, B>(phase: Phase, tasks: Vec<T>, work: F, make_builder: B) -> Result<()>
where
    T: Send,
    F: Fn(WorkerIndex, T) + Sync,
    B: Fn(WorkerIndex) -> io::Result<thread::Builder>,
{
    let work = &work;
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(tasks.len());
        let mut spawn_error = None;

        for (i, task) in tasks.into_iter().enumerate() {
            let worker = WorkerIndex::new(i);
            let spawned =
                make_builder(worker).and_then(|builder| builder.spawn_scoped(scope, move || work(worker, task)));
            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(source) => {
                    tracing::error!(%phase, worker = i, error = %source, "failed to spawn worker");
                    spawn_error = Some(EngineError::ThreadSpawn {
                        phase,
                        worker: i,
                        source,
                    });
                    break;
                }
            }
        }

        let mut panicked = None;
        for (worker, handle) in handles {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(EngineError::WorkerPanicked {
                    phase,
                    worker: worker.get(),
                });
            }
        }

        match spawn_error.or(panicked) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })
}
