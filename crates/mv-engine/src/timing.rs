use std::fmt;
use std::time::{Duration, Instant};

/// Wall-clock stopwatch started at construction.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Wall-clock times of one run.
///
/// `overall` spans the whole run; `compute` spans only the multiplication,
/// after loading and placement and before the result is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timings {
    pub overall: Duration,
    pub compute: Duration,
}

impl fmt::Display for Timings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall time: {:.6} seconds", self.overall.as_secs_f64())?;
        write!(f, "Compute time: {:.6} seconds", self.compute.as_secs_f64())
    }
}
