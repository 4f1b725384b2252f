use pwm_rtl::Polarity;
use sim_runtime::cyclize;
use tracing::trace;

use crate::error::{Error, Result};

/// One sampled output level. Tick 0 is the sample taken right after the
/// configuration was loaded, before the first tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
  pub tick_index: usize,
  pub level: bool,
}

/// Per-case record of every sampled level, in tick order.
#[derive(Debug, Clone, Default)]
pub struct ObservationLog {
  samples: Vec<Observation>,
}

impl ObservationLog {
  pub fn with_capacity(n: usize) -> Self {
    ObservationLog {
      samples: Vec::with_capacity(n),
    }
  }

  pub fn record(&mut self, tick_index: usize, level: bool) {
    debug_assert!(self
      .samples
      .last()
      .map_or(true, |last| last.tick_index < tick_index));
    self.samples.push(Observation { tick_index, level });
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Observation> {
    self.samples.iter()
  }

  pub fn last_tick(&self) -> usize {
    self.samples.last().map_or(0, |o| o.tick_index)
  }

  /// Number of level transitions in either direction.
  pub fn edge_count(&self) -> usize {
    self
      .samples
      .windows(2)
      .filter(|w| w[0].level != w[1].level)
      .count()
  }

  pub fn rising_edge_count(&self, polarity: Polarity) -> usize {
    self.rising_edges(polarity).len()
  }

  /// The first sample whose level differs from `expected`.
  pub fn first_deviation(&self, expected: bool) -> Option<&Observation> {
    self.samples.iter().find(|o| o.level != expected)
  }

  /// Positions (into the sample vector) where the output turns active.
  fn rising_edges(&self, polarity: Polarity) -> Vec<usize> {
    let active = polarity.active_level();
    (1..self.samples.len())
      .filter(|&i| self.samples[i - 1].level != active && self.samples[i].level == active)
      .collect()
  }
}

/// The period and duty realized by one complete cycle, anchored on the
/// rising edge at `start_tick` and closed by the next one at `end_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleMeasurement {
  pub start_tick: usize,
  pub end_tick: usize,
  pub period: u64,
  pub duty: u64,
}

/// Rebuilds every complete cycle of `log`.
///
/// Samples before the first rising edge belong to a cycle whose start was
/// not observed and are dropped, as is the trailing cycle that has no
/// closing edge.
pub fn reconstruct(log: &ObservationLog, polarity: Polarity) -> Result<Vec<CycleMeasurement>> {
  let edges = log.rising_edges(polarity);
  if edges.is_empty() {
    return Err(Error::AmbiguousSample { samples: log.len() });
  }
  let active = polarity.active_level();
  let samples = &log.samples;
  let res = edges
    .windows(2)
    .map(|w| {
      let (start, end) = (samples[w[0]].tick_index, samples[w[1]].tick_index);
      let duty = samples[w[0]..w[1]]
        .iter()
        .filter(|o| o.level == active)
        .count();
      trace!("{}: rising edge, cycle of {} ticks", cyclize(start), end - start);
      CycleMeasurement {
        start_tick: start,
        end_tick: end,
        period: (end - start) as u64,
        duty: duty as u64,
      }
    })
    .collect();
  Ok(res)
}
