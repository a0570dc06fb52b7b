//! Per-step wall-clock timing for `--time-execution`

use std::time::{Duration, Instant};

/// Records the time between successive pipeline steps
pub struct StepTimer {
  enabled: bool,
  started: Instant,
  last: Instant,
}

impl StepTimer {
  pub fn new(enabled: bool) -> Self {
    let now = Instant::now();
    Self {
      enabled,
      started: now,
      last: now,
    }
  }

  /// Close the current step and report it when enabled.
  ///
  /// Returns the step's duration.
  pub fn step(&mut self, name: &str) -> Duration {
    let now = Instant::now();
    let step = now - self.last;
    self.last = now;

    if self.enabled {
      tracing::info!(
        step = name,
        step_ms = step.as_millis() as u64,
        total_ms = (now - self.started).as_millis() as u64,
        "step finished"
      );
    }
    step
  }
}
