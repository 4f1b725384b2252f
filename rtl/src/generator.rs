use sim_runtime::Clocked;
use tracing::debug;

use crate::config::{InvalidConfig, Polarity, PwmConfig};

/// Anything a PWM verifier can drive: a clocked unit with a single output
/// bit that can be (re)loaded with a configuration.
pub trait PwmDevice: Clocked<Level = bool> {
  /// Load `config` and restart the cycle from counter 0.
  fn load(&mut self, config: PwmConfig);
}

/// Counter/compare PWM generator.
///
/// The output is combinational on the counter (`counter < duty`, then the
/// polarity), so advancing the counter is the only state change a tick
/// performs.
#[derive(Debug, Clone, Default)]
pub struct PwmGenerator {
  config: PwmConfig,
  counter: u32,
}

impl PwmGenerator {
  pub fn new(config: PwmConfig) -> Self {
    PwmGenerator { config, counter: 0 }
  }

  /// Validate and load a configuration. On error the generator is left
  /// exactly as it was.
  pub fn configure(
    &mut self,
    period: i64,
    duty: i64,
    polarity: Polarity,
  ) -> Result<(), InvalidConfig> {
    let config = PwmConfig::new(period, duty, polarity)?;
    self.load(config);
    Ok(())
  }

  pub fn load(&mut self, config: PwmConfig) {
    debug!(%config, "configuration loaded");
    *self = PwmGenerator::new(config);
  }

  pub fn reset(&mut self) {
    self.counter = 0;
  }

  pub fn tick(&mut self) -> bool {
    let next = self.counter + 1;
    self.counter = if next == self.config.period() { 0 } else { next };
    self.level()
  }

  pub fn level(&self) -> bool {
    self.config.polarity().apply(self.counter < self.config.duty())
  }

  pub fn counter(&self) -> u32 {
    self.counter
  }

  pub fn config(&self) -> &PwmConfig {
    &self.config
  }
}

impl Clocked for PwmGenerator {
  type Level = bool;

  fn tick(&mut self) -> bool {
    PwmGenerator::tick(self)
  }

  fn sample(&self) -> bool {
    self.level()
  }
}

impl PwmDevice for PwmGenerator {
  fn load(&mut self, config: PwmConfig) {
    PwmGenerator::load(self, config)
  }
}
