use crate::{DEFAULT_REST_SEC, format_duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestState {
    pub remaining: u32,
    pub is_running: bool,
}

/// Countdown between sets, advanced by calling [`RestTimer::tick`] once per second.
///
/// `run` is incremented each time a countdown is armed, so a driver holding a periodic timer
/// can tell that it has to replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestTimer {
    remaining: u32,
    is_running: bool,
    run: u64,
}

impl RestTimer {
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            is_running: false,
            run: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> RestState {
        RestState {
            remaining: self.remaining,
            is_running: self.is_running,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    #[must_use]
    pub fn run(&self) -> u64 {
        self.run
    }

    #[must_use]
    pub fn display(&self) -> String {
        format_duration(i64::from(self.remaining))
    }

    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
        self.arm();
    }

    /// Pause a running countdown, resume a paused one or restart a finished one.
    pub fn toggle(&mut self) {
        if self.is_running {
            self.is_running = false;
        } else if self.remaining == 0 {
            self.start(DEFAULT_REST_SEC);
        } else {
            self.arm();
        }
    }

    pub fn set_idle(&mut self, seconds: u32) {
        self.remaining = seconds;
        self.is_running = false;
    }

    /// Returns `true` if the countdown stopped with this tick.
    pub fn tick(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.is_running = false;
            return true;
        }
        self.remaining -= 1;
        false
    }

    fn arm(&mut self) {
        self.is_running = true;
        self.run = self.run.wrapping_add(1);
    }
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SEC)
    }
}
