use std::path::PathBuf;

use sim_runtime::ScheduleError;
use thiserror::Error;

use crate::verify::WindowTooLong;

#[derive(Debug, Error)]
pub enum Error {
  /// Edge reconstruction was asked to measure a waveform with no rising
  /// edge. The verifier routes such waveforms to level sampling, so this is
  /// a defect of the verifier itself.
  #[error("no rising edge among {samples} samples, cannot anchor a cycle")]
  AmbiguousSample { samples: usize },

  #[error("stimulus rejected")]
  Stimulus(#[from] ScheduleError),

  #[error("case cannot be observed")]
  Window(#[from] WindowTooLong),

  #[error("failed to read {path}")]
  ReadFile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse TOML in {path}")]
  ParseToml {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("failed to prepare dump directory {path}")]
  DumpDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {path}")]
  WriteFile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
