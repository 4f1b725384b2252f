use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pwm_rtl::{InvalidConfig, PwmConfig, PwmDevice, PwmGenerator};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::case::{directed_cases, random_case, CaseSpec};
use super::scoreboard::{Mismatch, Verdict};
use super::{observation_window, Verifier, WindowTooLong};
use crate::error::Result;
use crate::sim::{self, SuiteConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
  Pass,
  Fail(Mismatch),
  /// The case never reached the device.
  Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error(transparent)]
  Config(#[from] InvalidConfig),
  #[error(transparent)]
  Window(#[from] WindowTooLong),
}

impl CaseOutcome {
  pub fn is_pass(&self) -> bool {
    matches!(self, CaseOutcome::Pass)
  }
}

#[derive(Debug, Clone)]
pub struct CaseRecord {
  pub index: usize,
  pub name: String,
  /// `None` when the configuration itself was invalid.
  pub config: Option<PwmConfig>,
  pub outcome: CaseOutcome,
  /// Waveform dump written for a failing case.
  pub wave: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
  pub records: Vec<CaseRecord>,
  pub passed: usize,
  pub failed: usize,
  pub rejected: usize,
  /// Cancelled before every case ran.
  pub aborted: bool,
}

impl SuiteReport {
  fn push(&mut self, record: CaseRecord) {
    match record.outcome {
      CaseOutcome::Pass => self.passed += 1,
      CaseOutcome::Fail(_) => self.failed += 1,
      CaseOutcome::Rejected(_) => self.rejected += 1,
    }
    self.records.push(record);
  }

  pub fn total(&self) -> usize {
    self.records.len()
  }

  pub fn is_success(&self) -> bool {
    !self.aborted && self.failed == 0 && self.rejected == 0
  }

  pub fn failures(&self) -> impl Iterator<Item = &CaseRecord> {
    self.records.iter().filter(|r| !r.outcome.is_pass())
  }
}

/// Receives every case record as it completes, then the final report.
pub trait ReportSink {
  fn record(&mut self, record: &CaseRecord);

  fn finish(&mut self, _report: &SuiteReport) {}
}

impl ReportSink for () {
  fn record(&mut self, _record: &CaseRecord) {}
}

/// Reports through `tracing`: passes at debug, everything else at warn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
  fn record(&mut self, record: &CaseRecord) {
    match &record.outcome {
      CaseOutcome::Pass => debug!(case = %record.name, "pass"),
      CaseOutcome::Fail(mismatch) => match &record.wave {
        Some(wave) => warn!(case = %record.name, wave = %wave.display(), "fail: {}", mismatch),
        None => warn!(case = %record.name, "fail: {}", mismatch),
      },
      CaseOutcome::Rejected(err) => warn!(case = %record.name, "rejected: {}", err),
    }
  }

  fn finish(&mut self, report: &SuiteReport) {
    info!(
      passed = report.passed,
      failed = report.failed,
      rejected = report.rejected,
      aborted = report.aborted,
      "suite finished"
    );
  }
}

/// Shared flag to stop a running suite. Polled between cases only, so a
/// case that already started always completes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
  pub fn cancel(&self) {
    self.0.store(true, Ordering::SeqCst);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::SeqCst)
  }
}

pub struct Suite {
  config: SuiteConfig,
  cancel: CancelToken,
}

impl Suite {
  pub fn new(config: SuiteConfig) -> Self {
    Suite {
      config,
      cancel: CancelToken::default(),
    }
  }

  pub fn config(&self) -> &SuiteConfig {
    &self.config
  }

  pub fn cancel_token(&self) -> CancelToken {
    self.cancel.clone()
  }

  /// Directed cases, then cases from the suite file, then randomized ones,
  /// restricted to names containing the filter.
  pub fn cases(&self) -> Vec<CaseSpec> {
    let config = &self.config;
    let directed = if config.include_directed {
      directed_cases()
    } else {
      Vec::new()
    };
    let random = (0..config.random_cases)
      .map(|i| {
        random_case(config.seed, i, config.max_period, config.cycles)
          .with_tolerance(config.tolerance)
      });
    directed
      .into_iter()
      .chain(config.cases.iter().cloned())
      .chain(random)
      .filter(|case| {
        config
          .filter
          .as_ref()
          .map_or(true, |f| case.name.contains(f.as_str()))
      })
      .collect()
  }

  pub fn run<S: ReportSink>(&self, sink: &mut S) -> Result<SuiteReport> {
    self.run_with(PwmGenerator::default, sink)
  }

  /// Runs every case against devices built by `factory`. Sequential runs
  /// share one device, parallel runs build one per case.
  pub fn run_with<D, F, S>(&self, factory: F, sink: &mut S) -> Result<SuiteReport>
  where
    D: PwmDevice + Send,
    F: Fn() -> D + Sync,
    S: ReportSink,
  {
    let cases = self.cases();
    let dump_dir = self.config.dump_dir.as_deref();
    if let Some(dir) = dump_dir {
      sim::prepare_dump_dir(dir, self.config.override_dump)?;
    }
    info!(
      cases = cases.len(),
      seed = self.config.seed,
      parallel = self.config.parallel,
      "suite started"
    );

    let mut report = SuiteReport::default();
    if self.config.parallel {
      let records = cases
        .par_iter()
        .enumerate()
        .map(|(index, spec)| {
          if self.cancel.is_cancelled() {
            return Ok(None);
          }
          let mut verifier = Verifier::new(factory());
          run_one(&mut verifier, index, spec, dump_dir).map(Some)
        })
        .collect::<Result<Vec<_>>>()?;
      report.aborted = records.iter().any(Option::is_none);
      for record in records.into_iter().flatten() {
        sink.record(&record);
        report.push(record);
      }
    } else {
      let mut verifier = Verifier::new(factory());
      for (index, spec) in cases.iter().enumerate() {
        if self.cancel.is_cancelled() {
          report.aborted = true;
          break;
        }
        let record = run_one(&mut verifier, index, spec, dump_dir)?;
        sink.record(&record);
        report.push(record);
      }
    }
    sink.finish(&report);
    Ok(report)
  }
}

fn run_one<D: PwmDevice>(
  verifier: &mut Verifier<D>,
  index: usize,
  spec: &CaseSpec,
  dump_dir: Option<&Path>,
) -> Result<CaseRecord> {
  let mut record = CaseRecord {
    index,
    name: spec.name.clone(),
    config: None,
    outcome: CaseOutcome::Pass,
    wave: None,
  };
  let config = match spec.config() {
    Ok(config) => config,
    Err(err) => {
      record.outcome = CaseOutcome::Rejected(err.into());
      return Ok(record);
    }
  };
  record.config = Some(config);
  if let Err(err) = observation_window(config.period(), spec.cycles) {
    record.outcome = CaseOutcome::Rejected(err.into());
    return Ok(record);
  }
  let (verdict, log) = verifier.observe_case(config, spec.tolerance, spec.cycles)?;
  if let Verdict::Fail(mismatch) = verdict {
    if let Some(dir) = dump_dir {
      let path = sim::dump_path(dir, index, &spec.name);
      sim::dump_vcd(&log, &config, &path)?;
      record.wave = Some(path);
    }
    record.outcome = CaseOutcome::Fail(mismatch);
  }
  Ok(record)
}

fn suite_config(directed: &[CaseSpec], randomized_case_count: usize, seed: u64) -> SuiteConfig {
  SuiteConfig {
    seed,
    random_cases: randomized_case_count,
    include_directed: false,
    cases: directed.to_vec(),
    ..Default::default()
  }
}

/// Runs `directed` followed by `randomized_case_count` cases drawn from
/// `seed` against a fresh [`PwmGenerator`], reporting through
/// [`TracingSink`].
pub fn run_suite(
  directed: &[CaseSpec],
  randomized_case_count: usize,
  seed: u64,
) -> Result<SuiteReport> {
  Suite::new(suite_config(directed, randomized_case_count, seed)).run(&mut TracingSink)
}

/// Same cases as [`run_suite`], spread over the rayon pool with one device
/// per case built by `factory`.
pub fn run_suite_parallel<D, F>(
  directed: &[CaseSpec],
  randomized_case_count: usize,
  seed: u64,
  factory: F,
) -> Result<SuiteReport>
where
  D: PwmDevice + Send,
  F: Fn() -> D + Sync,
{
  let config = SuiteConfig {
    parallel: true,
    ..suite_config(directed, randomized_case_count, seed)
  };
  Suite::new(config).run_with(factory, &mut TracingSink)
}
