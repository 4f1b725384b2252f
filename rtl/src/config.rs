use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
  #[default]
  ActiveHigh,
  ActiveLow,
}

impl Polarity {
  /// The logical level an active output is driven to.
  pub fn active_level(self) -> bool {
    matches!(self, Polarity::ActiveHigh)
  }

  /// Maps a raw "active" condition to the observed level.
  pub fn apply(self, active: bool) -> bool {
    active ^ matches!(self, Polarity::ActiveLow)
  }

  pub fn inverted(self) -> Polarity {
    match self {
      Polarity::ActiveHigh => Polarity::ActiveLow,
      Polarity::ActiveLow => Polarity::ActiveHigh,
    }
  }
}

impl fmt::Display for Polarity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Polarity::ActiveHigh => write!(f, "active-high"),
      Polarity::ActiveLow => write!(f, "active-low"),
    }
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidConfig {
  #[error("period must be positive, got {period}")]
  NonPositivePeriod { period: i64 },
  #[error("duty must not be negative, got {duty}")]
  NegativeDuty { duty: i64 },
  #[error("duty {duty} exceeds period {period}")]
  DutyExceedsPeriod { duty: i64, period: i64 },
  #[error("{value} does not fit the {bits}-bit counter")]
  TooWide { value: i64, bits: u32 },
}

/// A validated generator configuration.
///
/// The fields are private so that every value in circulation satisfies
/// `0 <= duty <= period` and `period > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PwmConfig {
  period: u32,
  duty: u32,
  polarity: Polarity,
}

impl PwmConfig {
  pub fn new(period: i64, duty: i64, polarity: Polarity) -> Result<Self, InvalidConfig> {
    if period <= 0 {
      return Err(InvalidConfig::NonPositivePeriod { period });
    }
    if duty < 0 {
      return Err(InvalidConfig::NegativeDuty { duty });
    }
    if duty > period {
      return Err(InvalidConfig::DutyExceedsPeriod { duty, period });
    }
    let period = u32::try_from(period).map_err(|_| InvalidConfig::TooWide {
      value: period,
      bits: u32::BITS,
    })?;
    // duty <= period, so it fits whenever period does.
    Ok(PwmConfig {
      period,
      duty: duty as u32,
      polarity,
    })
  }

  pub fn period(&self) -> u32 {
    self.period
  }

  pub fn duty(&self) -> u32 {
    self.duty
  }

  pub fn polarity(&self) -> Polarity {
    self.polarity
  }

  pub fn with_polarity(self, polarity: Polarity) -> Self {
    PwmConfig { polarity, ..self }
  }

  /// A waveform without edges: constantly inactive or constantly active.
  pub fn is_degenerate(&self) -> bool {
    self.duty == 0 || self.duty == self.period
  }

  /// The level a degenerate configuration holds on every tick.
  pub fn constant_level(&self) -> Option<bool> {
    if self.duty == 0 {
      Some(self.polarity.apply(false))
    } else if self.duty == self.period {
      Some(self.polarity.apply(true))
    } else {
      None
    }
  }
}

impl Default for PwmConfig {
  fn default() -> Self {
    PwmConfig {
      period: 1,
      duty: 0,
      polarity: Polarity::ActiveHigh,
    }
  }
}

impl fmt::Display for PwmConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "period={} duty={} {}",
      self.period, self.duty, self.polarity
    )
  }
}
