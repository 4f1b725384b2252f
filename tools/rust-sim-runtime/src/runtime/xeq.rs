use std::collections::BTreeMap;

use thiserror::Error;

pub trait Cycled {
  fn cycle(&self) -> usize;
  fn pusher(&self) -> &'static str;
}

/// A payload to be applied to a clocked unit right before the tick of `cycle`.
#[derive(Debug, Clone)]
pub struct Stimulus<T> {
  cycle: usize,
  payload: T,
  pusher: &'static str,
}

impl<T> Stimulus<T> {
  pub fn new(cycle: usize, payload: T, pusher: &'static str) -> Self {
    Stimulus {
      cycle,
      payload,
      pusher,
    }
  }

  pub fn into_payload(self) -> T {
    self.payload
  }
}

impl<T> Cycled for Stimulus<T> {
  fn cycle(&self) -> usize {
    self.cycle
  }
  fn pusher(&self) -> &'static str {
    self.pusher
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cycle @{cycle}: already occupied by {existing}, cannot accept {rejected}")]
pub struct Occupied {
  pub cycle: usize,
  pub existing: &'static str,
  pub rejected: &'static str,
}

// XEQ for exclusive events per cycle
pub struct XEQ<T: Sized + Cycled> {
  q: BTreeMap<usize, T>,
}

impl<T: Sized + Cycled> Default for XEQ<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Sized + Cycled> XEQ<T> {
  pub fn new() -> Self {
    XEQ { q: BTreeMap::new() }
  }

  pub fn push(&mut self, event: T) -> Result<(), Occupied> {
    if let Some(existing) = self.q.get(&event.cycle()) {
      Err(Occupied {
        cycle: existing.cycle(),
        existing: existing.pusher(),
        rejected: event.pusher(),
      })
    } else {
      self.q.insert(event.cycle(), event);
      Ok(())
    }
  }

  /// Pops the earliest event due at or before `current`.
  pub fn pop(&mut self, current: usize) -> Option<T> {
    if self
      .q
      .first_key_value()
      .is_some_and(|(cycle, _)| *cycle <= current)
    {
      self.q.pop_first().map(|(_, event)| event)
    } else {
      None
    }
  }

  pub fn len(&self) -> usize {
    self.q.len()
  }

  pub fn is_empty(&self) -> bool {
    self.q.is_empty()
  }
}
