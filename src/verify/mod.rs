//! Self-checking testbench for PWM devices.
//!
//! A [`Verifier`] owns one device. For each case it loads the configuration,
//! clocks the device in lock-step while recording every sampled level, and
//! hands the log to a [`Scoreboard`] for a verdict.

pub mod case;
pub mod observe;
pub mod scoreboard;
pub mod suite;

use pwm_rtl::{PwmConfig, PwmDevice};
use sim_runtime::ClockDriver;
use thiserror::Error;
use tracing::debug;

use crate::error::Result;

pub use case::{directed_cases, random_case, CaseSpec};
pub use observe::{reconstruct, CycleMeasurement, Observation, ObservationLog};
pub use scoreboard::{Mismatch, MismatchKind, Scoreboard, Verdict};
pub use suite::{
  run_suite, run_suite_parallel, CancelToken, CaseOutcome, CaseRecord, Rejection, ReportSink,
  Suite, SuiteReport, TracingSink,
};

/// Longest observation a single case may ask for, in ticks.
pub const MAX_WINDOW_TICKS: usize = 1 << 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{cycles} cycles of period {period} exceed the {limit}-tick observation window")]
pub struct WindowTooLong {
  pub period: u32,
  pub cycles: usize,
  pub limit: usize,
}

/// Ticks clocked after the first sample to observe `cycles` complete cycles:
/// `cycles + 1` periods, the extra one being the settle margin that makes up
/// for the leading partial cycle. `cycles == 0` is treated as 1.
pub fn observation_window(period: u32, cycles: usize) -> Result<usize, WindowTooLong> {
  cycles
    .max(1)
    .checked_add(1)
    .and_then(|n| n.checked_mul(period as usize))
    .filter(|&ticks| ticks <= MAX_WINDOW_TICKS)
    .ok_or(WindowTooLong {
      period,
      cycles,
      limit: MAX_WINDOW_TICKS,
    })
}

pub struct Verifier<D: PwmDevice> {
  device: D,
}

impl<D: PwmDevice> Verifier<D> {
  pub fn new(device: D) -> Self {
    Verifier { device }
  }

  pub fn run_case(&mut self, config: PwmConfig, tolerance: u32, cycles: usize) -> Result<Verdict> {
    self.observe_case(config, tolerance, cycles).map(|(verdict, _)| verdict)
  }

  /// Same as [`Verifier::run_case`], also returning the recorded log. The
  /// device is clocked for [`observation_window`] ticks.
  pub fn observe_case(
    &mut self,
    config: PwmConfig,
    tolerance: u32,
    cycles: usize,
  ) -> Result<(Verdict, ObservationLog)> {
    let ticks = observation_window(config.period(), cycles)?;
    let cycles = cycles.max(1);
    self.device.load(config);

    let mut log = ObservationLog::with_capacity(ticks + 1);
    let mut driver = ClockDriver::<PwmConfig>::new();
    driver.run(
      &mut self.device,
      ticks,
      |device, config| device.load(config),
      |tick, level| log.record(tick, level),
    );

    let verdict = Scoreboard::new(config, tolerance, cycles).check(&log)?;
    debug!(
      %config,
      ticks,
      edges = log.edge_count(),
      pass = verdict.is_pass(),
      "case observed"
    );
    Ok((verdict, log))
  }
}
