use std::fmt;

use pwm_rtl::PwmConfig;
use thiserror::Error;

use super::observe::{reconstruct, ObservationLog};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchKind {
  /// Ticks between consecutive rising edges.
  Period,
  /// Active ticks within one cycle, beyond the tolerance.
  Duty,
  /// A degenerate waveform left its constant level.
  Level,
  /// Fewer complete cycles than requested were observed.
  MissingCycles,
}

impl fmt::Display for MismatchKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MismatchKind::Period => write!(f, "period"),
      MismatchKind::Duty => write!(f, "duty"),
      MismatchKind::Level => write!(f, "level"),
      MismatchKind::MissingCycles => write!(f, "cycle count"),
    }
  }
}

/// A verification mismatch: the realized waveform differs from the
/// configured one. This is a test failure, not a fault of the harness.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} mismatch at Cycle @{failing_tick}: expected {expected}, measured {measured}")]
pub struct Mismatch {
  pub kind: MismatchKind,
  pub expected: u64,
  pub measured: u64,
  pub failing_tick: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
  Pass,
  Fail(Mismatch),
}

impl Verdict {
  pub fn is_pass(&self) -> bool {
    matches!(self, Verdict::Pass)
  }

  pub fn mismatch(&self) -> Option<&Mismatch> {
    match self {
      Verdict::Pass => None,
      Verdict::Fail(m) => Some(m),
    }
  }
}

/// Judges an observation log against the configuration it was recorded
/// under.
///
/// Periods must match exactly. Duty may deviate by at most `tolerance`
/// ticks per cycle. Degenerate configurations have no edges, so they are
/// judged by level alone.
#[derive(Debug, Clone, Copy)]
pub struct Scoreboard {
  config: PwmConfig,
  tolerance: u32,
  cycles: usize,
}

impl Scoreboard {
  pub fn new(config: PwmConfig, tolerance: u32, cycles: usize) -> Self {
    Scoreboard {
      config,
      tolerance,
      cycles: cycles.max(1),
    }
  }

  pub fn check(&self, log: &ObservationLog) -> Result<Verdict> {
    match self.config.constant_level() {
      Some(level) => Ok(self.check_constant(log, level)),
      None => self.check_cycles(log),
    }
  }

  fn check_constant(&self, log: &ObservationLog, level: bool) -> Verdict {
    match log.first_deviation(level) {
      Some(o) => Verdict::Fail(Mismatch {
        kind: MismatchKind::Level,
        expected: level as u64,
        measured: o.level as u64,
        failing_tick: o.tick_index,
      }),
      None => Verdict::Pass,
    }
  }

  fn check_cycles(&self, log: &ObservationLog) -> Result<Verdict> {
    // Without a rising edge there is nothing to anchor a cycle on. Under a
    // non-degenerate configuration that is a failure of the device.
    if log.rising_edge_count(self.config.polarity()) == 0 {
      return Ok(Verdict::Fail(self.missing_cycles(log, 0)));
    }
    let period = self.config.period() as u64;
    let duty = self.config.duty() as u64;
    let cycles = reconstruct(log, self.config.polarity())?;
    for cycle in cycles.iter() {
      if cycle.period != period {
        return Ok(Verdict::Fail(Mismatch {
          kind: MismatchKind::Period,
          expected: period,
          measured: cycle.period,
          failing_tick: cycle.start_tick + cycle.period.min(period) as usize,
        }));
      }
      if cycle.duty.abs_diff(duty) > self.tolerance as u64 {
        return Ok(Verdict::Fail(Mismatch {
          kind: MismatchKind::Duty,
          expected: duty,
          measured: cycle.duty,
          failing_tick: cycle.start_tick + cycle.duty.min(duty) as usize,
        }));
      }
    }
    if cycles.len() < self.cycles {
      return Ok(Verdict::Fail(self.missing_cycles(log, cycles.len())));
    }
    Ok(Verdict::Pass)
  }

  fn missing_cycles(&self, log: &ObservationLog, observed: usize) -> Mismatch {
    Mismatch {
      kind: MismatchKind::MissingCycles,
      expected: self.cycles as u64,
      measured: observed as u64,
      failing_tick: log.last_tick(),
    }
  }
}
