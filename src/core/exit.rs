//! Process termination used by [`Logger::fatal_error`](super::Logger::fatal_error)

use parking_lot::Mutex;

/// Exit status used after a fatal record
pub const FATAL_EXIT_CODE: i32 = 1;

/// Capability to end the process
///
/// The default [`ProcessExit`] calls [`std::process::exit`]. Tests inject a
/// [`RecordingExit`] to observe the exit without ending the test process.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Ends the process with [`std::process::exit`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

/// Records requested exit codes instead of exiting
#[derive(Debug, Default)]
pub struct RecordingExit {
    codes: Mutex<Vec<i32>>,
}

impl RecordingExit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit codes requested so far, oldest first
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().clone()
    }

    pub fn last_code(&self) -> Option<i32> {
        self.codes.lock().last().copied()
    }
}

impl Terminator for RecordingExit {
    fn terminate(&self, code: i32) {
        self.codes.lock().push(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_exit() {
        let exit = RecordingExit::new();
        assert_eq!(exit.last_code(), None);

        exit.terminate(FATAL_EXIT_CODE);
        exit.terminate(3);

        assert_eq!(exit.codes(), vec![1, 3]);
        assert_eq!(exit.last_code(), Some(3));
    }
}
