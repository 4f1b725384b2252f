use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::verify::case::{CaseSpec, DEFAULT_CYCLES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
  /// Seed of the randomized cases
  pub seed: u64,
  /// The number of randomized cases to run after the directed ones
  pub random_cases: usize,
  /// Upper bound of a randomized period
  pub max_period: u32,
  /// The number of complete cycles each randomized case must show
  pub cycles: usize,
  /// Duty deviation accepted for randomized cases, in ticks
  pub tolerance: u32,
  /// Prepend the built-in boundary cases
  pub include_directed: bool,
  /// Run cases on the rayon thread pool, one device per case
  pub parallel: bool,
  /// Only run cases whose name contains this string
  pub filter: Option<String>,
  /// The directory failing cases dump their waveforms to
  pub dump_dir: Option<PathBuf>,
  /// If true, the dump directory is emptied before the suite runs
  pub override_dump: bool,
  /// Extra directed cases
  pub cases: Vec<CaseSpec>,
}

impl Default for SuiteConfig {
  fn default() -> Self {
    SuiteConfig {
      seed: 0,
      random_cases: 64,
      max_period: 64,
      cycles: DEFAULT_CYCLES,
      tolerance: 0,
      include_directed: true,
      parallel: false,
      filter: None,
      dump_dir: None,
      override_dump: true,
      cases: Vec::new(),
    }
  }
}

impl SuiteConfig {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = fs::read_to_string(path).map_err(|source| Error::ReadFile {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&raw, path)
  }

  /// Parses a suite file; `origin` only names the source in errors.
  pub fn parse(raw: &str, origin: &Path) -> Result<Self> {
    toml::from_str(raw).map_err(|source| Error::ParseToml {
      path: origin.to_path_buf(),
      source,
    })
  }
}

/// The file a failing case dumps its waveform to. Sanitizing is lossy, so the
/// case index keeps two cases from sharing a file.
pub fn dump_path(dir: &Path, index: usize, case_name: &str) -> PathBuf {
  let fname = case_name
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
    .collect::<String>();
  dir.join(format!("{}-{}.vcd", fname, index))
}

/// Creates `dir` if needed. With `override_dir` every entry already in it is
/// removed.
pub fn prepare_dump_dir(dir: &Path, override_dir: bool) -> Result<()> {
  let wrap = |source| Error::DumpDir {
    path: dir.to_path_buf(),
    source,
  };
  if !dir.exists() {
    fs::create_dir_all(dir).map_err(wrap)?;
  }
  if override_dir {
    for elem in fs::read_dir(dir).map_err(wrap)? {
      let path = elem.map_err(wrap)?.path();
      if path.is_dir() {
        fs::remove_dir_all(path).map_err(wrap)?;
      } else {
        fs::remove_file(path).map_err(wrap)?;
      }
    }
  }
  Ok(())
}
