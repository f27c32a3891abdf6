use std::time::Duration;

use crate::constants::TIMER_HZ;

/// # Fixed timestep
/// Turns real elapsed time into a whole number of logical steps.
///
/// Elapsed time is accumulated and paid out one `step` at a time; the remainder
/// carries over, so the number of steps taken depends only on the total time fed
/// in and never on how often the host asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    /// # Arguments
    /// * `step` the length of one logical step; zero is treated as one nanosecond
    pub fn new(step: Duration) -> Self {
        FixedTimestep {
            step: step.max(Duration::from_nanos(1)),
            accumulator: Duration::from_secs(0),
        }
    }

    /// A timestep taking `hz` logical steps per second
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time accumulated towards the next step
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Adds `elapsed` to the accumulator and returns how many steps are now due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        due
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_hz(TIMER_HZ)
    }
}
