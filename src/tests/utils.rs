//! Deliberately broken PWM devices, one per bug class the scoreboard must
//! catch.

use pwm_rtl::{PwmConfig, PwmDevice};
use sim_runtime::Clocked;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Fault {
  /// Compares `counter <= duty`.
  OffByOneCompare,
  /// Wraps one tick late, stretching every period by one.
  LateWrap,
  /// Output never leaves this level.
  StuckAt(bool),
  /// Drives the raw comparison regardless of polarity.
  IgnoresPolarity,
}

#[derive(Debug, Clone)]
pub(super) struct FaultyGenerator {
  fault: Fault,
  config: PwmConfig,
  counter: u32,
}

impl FaultyGenerator {
  pub(super) fn new(fault: Fault) -> Self {
    FaultyGenerator {
      fault,
      config: PwmConfig::default(),
      counter: 0,
    }
  }
}

impl Clocked for FaultyGenerator {
  type Level = bool;

  fn tick(&mut self) -> bool {
    let wrap_at = match self.fault {
      Fault::LateWrap => self.config.period() + 1,
      _ => self.config.period(),
    };
    self.counter = (self.counter + 1) % wrap_at;
    self.sample()
  }

  fn sample(&self) -> bool {
    let duty = self.config.duty();
    let polarity = self.config.polarity();
    match self.fault {
      Fault::OffByOneCompare => polarity.apply(self.counter <= duty),
      Fault::LateWrap => polarity.apply(self.counter < duty),
      Fault::StuckAt(level) => level,
      Fault::IgnoresPolarity => self.counter < duty,
    }
  }
}

impl PwmDevice for FaultyGenerator {
  fn load(&mut self, config: PwmConfig) {
    self.config = config;
    self.counter = 0;
  }
}

pub(super) fn temp_dir(name: &str) -> std::path::PathBuf {
  std::env::temp_dir().join(format!("pwm-tb-{}-{}", name, std::process::id()))
}
