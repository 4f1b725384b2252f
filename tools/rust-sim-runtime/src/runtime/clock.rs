use thiserror::Error;
use tracing::trace;

use super::utils::cyclize;
use super::xeq::{Cycled, Occupied, Stimulus, XEQ};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
  #[error(transparent)]
  Occupied(#[from] Occupied),
  #[error("Cycle @{cycle}: already reached, the driver is at Cycle @{current}")]
  Past { cycle: usize, current: usize },
}

/// A unit advanced by a single clock.
///
/// `tick` is the only state transition: every state variable of the unit is
/// updated inside one call, so no caller can observe a half-advanced state.
/// `sample` must be free of side effects.
pub trait Clocked {
  type Level: Copy;

  fn tick(&mut self) -> Self::Level;
  fn sample(&self) -> Self::Level;
}

/// Lock-step driver of a single clock domain.
///
/// Cycle 0 is the state right after construction (or after the unit was last
/// configured by the caller). Every `step` moves to the next cycle and then
/// samples the unit. A stimulus scheduled for a cycle is applied in place of
/// that cycle's tick, which models a synchronous load: the unit leaves the
/// cycle in exactly the state the stimulus put it in.
pub struct ClockDriver<S> {
  cycle: usize,
  stimuli: XEQ<Stimulus<S>>,
}

impl<S> Default for ClockDriver<S> {
  fn default() -> Self {
    Self::new()
  }
}

impl<S> ClockDriver<S> {
  pub fn new() -> Self {
    ClockDriver {
      cycle: 0,
      stimuli: XEQ::new(),
    }
  }

  pub fn cycle(&self) -> usize {
    self.cycle
  }

  pub fn pending(&self) -> usize {
    self.stimuli.len()
  }

  /// Schedules `payload` in place of the tick of `cycle`, which must still be
  /// ahead of the driver.
  pub fn schedule(
    &mut self,
    cycle: usize,
    payload: S,
    pusher: &'static str,
  ) -> Result<(), ScheduleError> {
    if cycle <= self.cycle {
      return Err(ScheduleError::Past {
        cycle,
        current: self.cycle,
      });
    }
    self.stimuli.push(Stimulus::new(cycle, payload, pusher))?;
    Ok(())
  }

  pub fn sample<D: Clocked>(&self, dut: &D) -> D::Level {
    dut.sample()
  }

  pub fn step<D, F>(&mut self, dut: &mut D, apply: &mut F) -> D::Level
  where
    D: Clocked,
    F: FnMut(&mut D, S),
  {
    self.cycle += 1;
    match self.stimuli.pop(self.cycle) {
      Some(stimulus) => {
        trace!(pusher = stimulus.pusher(), "{}: stimulus applied", cyclize(stimulus.cycle()));
        apply(dut, stimulus.into_payload());
        dut.sample()
      }
      None => dut.tick(),
    }
  }

  /// Observes the current cycle, then steps `ticks` times observing each
  /// new cycle. `observe` is called `ticks + 1` times in cycle order.
  pub fn run<D, F, O>(&mut self, dut: &mut D, ticks: usize, mut apply: F, mut observe: O)
  where
    D: Clocked,
    F: FnMut(&mut D, S),
    O: FnMut(usize, D::Level),
  {
    observe(self.cycle, dut.sample());
    for _ in 0..ticks {
      let level = self.step(dut, &mut apply);
      observe(self.cycle, level);
    }
  }
}
