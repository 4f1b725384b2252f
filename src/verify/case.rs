use pwm_rtl::{InvalidConfig, Polarity, PwmConfig};
use serde::{Deserialize, Serialize};
use sim_runtime::{case_rng, rand::Rng};

pub const DEFAULT_CYCLES: usize = 3;

fn default_cycles() -> usize {
  DEFAULT_CYCLES
}

/// One test case as it comes from a case source, before validation.
///
/// `period` and `duty` are kept signed and unchecked so that a malformed
/// case reaches the generator and is rejected there, instead of being lost
/// while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSpec {
  pub name: String,
  pub period: i64,
  pub duty: i64,
  #[serde(default)]
  pub polarity: Polarity,
  #[serde(default)]
  pub tolerance: u32,
  #[serde(default = "default_cycles")]
  pub cycles: usize,
}

impl CaseSpec {
  pub fn new(name: impl Into<String>, period: i64, duty: i64, polarity: Polarity) -> Self {
    CaseSpec {
      name: name.into(),
      period,
      duty,
      polarity,
      tolerance: 0,
      cycles: DEFAULT_CYCLES,
    }
  }

  pub fn with_tolerance(mut self, tolerance: u32) -> Self {
    self.tolerance = tolerance;
    self
  }

  pub fn with_cycles(mut self, cycles: usize) -> Self {
    self.cycles = cycles;
    self
  }

  pub fn config(&self) -> Result<PwmConfig, InvalidConfig> {
    PwmConfig::new(self.period, self.duty, self.polarity)
  }
}

/// Boundary cases every generator must get right.
pub fn directed_cases() -> Vec<CaseSpec> {
  use Polarity::*;
  vec![
    CaseSpec::new("min-period-idle", 1, 0, ActiveHigh),
    CaseSpec::new("min-period-full", 1, 1, ActiveHigh),
    CaseSpec::new("min-edge", 2, 1, ActiveHigh),
    CaseSpec::new("duty-zero", 4, 0, ActiveHigh),
    CaseSpec::new("duty-full", 8, 8, ActiveHigh),
    CaseSpec::new("half-even", 10, 5, ActiveHigh),
    CaseSpec::new("half-odd", 7, 3, ActiveHigh),
    CaseSpec::new("ten-three", 10, 3, ActiveHigh),
    CaseSpec::new("one-below-full", 9, 8, ActiveHigh),
    CaseSpec::new("duty-zero-low", 4, 0, ActiveLow),
    CaseSpec::new("duty-full-low", 8, 8, ActiveLow),
    CaseSpec::new("half-odd-low", 7, 3, ActiveLow),
    CaseSpec::new("ten-three-low", 10, 3, ActiveLow),
  ]
}

/// The `index`-th randomized case under `seed`.
///
/// A pure function of its arguments: period in `1..=max_period`, duty in
/// `0..=period`, either polarity.
pub fn random_case(seed: u64, index: usize, max_period: u32, cycles: usize) -> CaseSpec {
  let mut rng = case_rng(seed, index);
  let period = rng.gen_range(1..=max_period.max(1)) as i64;
  let duty = rng.gen_range(0..=period);
  let polarity = if rng.gen::<bool>() {
    Polarity::ActiveLow
  } else {
    Polarity::ActiveHigh
  };
  CaseSpec::new(format!("random-{}-{}", seed, index), period, duty, polarity).with_cycles(cycles)
}
