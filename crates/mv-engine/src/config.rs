use std::path::PathBuf;

use crate::error::Result;
use crate::partition::WorkerCount;

/// How the product is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single-threaded kernel.
    Serial,
    /// Row-block parallel kernel with `threads` workers.
    Threaded { threads: usize },
    /// As `Threaded`, preceded by a parallel first-touch placement phase.
    ThreadedFirstTouch { threads: usize },
}

impl Mode {
    /// Worker count for the parallel modes, `None` for `Serial`.
    ///
    /// # Errors
    /// Returns `InvalidThreadCount` if a parallel mode asks for zero threads.
    pub fn workers(&self) -> Result<Option<WorkerCount>> {
        match *self {
            Mode::Serial => Ok(None),
            Mode::Threaded { threads } | Mode::ThreadedFirstTouch { threads } => {
                WorkerCount::new(threads).map(Some)
            }
        }
    }

    pub fn first_touch(&self) -> bool {
        matches!(self, Mode::ThreadedFirstTouch { .. })
    }
}

/// Inputs, output and mode of one multiplication run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Matrix file A.
    pub a_path: PathBuf,
    /// Column vector file x.
    pub x_path: PathBuf,
    /// Output file for y; created or truncated.
    pub y_path: PathBuf,
    pub mode: Mode,
}

impl RunConfig {
    pub fn new(
        a_path: impl Into<PathBuf>,
        x_path: impl Into<PathBuf>,
        y_path: impl Into<PathBuf>,
        mode: Mode,
    ) -> Self {
        RunConfig {
            a_path: a_path.into(),
            x_path: x_path.into(),
            y_path: y_path.into(),
            mode,
        }
    }

    /// Check the settings that do not need any file access.
    pub fn validate(&self) -> Result<()> {
        self.mode.workers().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_mode_workers() {
        assert_eq!(Mode::Serial.workers().unwrap(), None);
        assert_eq!(
            Mode::Threaded { threads: 4 }.workers().unwrap().map(|w| w.get()),
            Some(4)
        );
        assert!(Mode::ThreadedFirstTouch { threads: 2 }.first_touch());
        assert!(!Mode::Threaded { threads: 2 }.first_touch());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let cfg = RunConfig::new("a", "x", "y", Mode::ThreadedFirstTouch { threads: 0 });
        assert!(matches!(
            cfg.validate(),
            Err(EngineError::InvalidThreadCount(0))
        ));
        assert!(RunConfig::new("a", "x", "y", Mode::Serial).validate().is_ok());
    }
}
