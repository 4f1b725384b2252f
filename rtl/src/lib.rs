//! Cycle-accurate model of a counter/compare PWM generator.
//!
//! The generator owns a free-running counter that wraps after `period`
//! ticks. The output is active while the counter is below `duty`, and the
//! polarity decides which logical level "active" maps to.

pub mod config;
pub mod generator;

pub use config::{InvalidConfig, Polarity, PwmConfig};
pub use generator::{PwmDevice, PwmGenerator};
