//! Command-line runner for the PWM verification suite.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use pwm_tb::verify::TracingSink;
use pwm_tb::{logging, Suite, SuiteConfig};

#[derive(Parser, Debug)]
#[command(name = "pwm-tb")]
#[command(about = "Run directed and randomized PWM generator test cases")]
struct Args {
  /// Suite file (TOML); command-line options override its values
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Seed of the randomized cases
  #[arg(long)]
  seed: Option<u64>,

  /// Number of randomized cases
  #[arg(long)]
  random_cases: Option<usize>,

  /// Upper bound of a randomized period
  #[arg(long)]
  max_period: Option<u32>,

  /// Skip the built-in boundary cases
  #[arg(long)]
  no_directed: bool,

  /// Only run cases whose name contains this string
  #[arg(short, long)]
  filter: Option<String>,

  /// Run cases in parallel
  #[arg(long)]
  parallel: bool,

  /// Dump the waveform of every failing case into this directory
  #[arg(long)]
  dump_dir: Option<PathBuf>,

  /// Print the selected cases and exit
  #[arg(long)]
  list: bool,

  /// Debug output for the testbench crates
  #[arg(short, long)]
  verbose: bool,
}

impl Args {
  fn suite_config(&self) -> pwm_tb::Result<SuiteConfig> {
    let mut config = match &self.config {
      Some(path) => SuiteConfig::load(path)?,
      None => SuiteConfig::default(),
    };
    if let Some(seed) = self.seed {
      config.seed = seed;
    }
    if let Some(n) = self.random_cases {
      config.random_cases = n;
    }
    if let Some(max) = self.max_period {
      config.max_period = max;
    }
    if self.no_directed {
      config.include_directed = false;
    }
    if self.filter.is_some() {
      config.filter = self.filter.clone();
    }
    if self.parallel {
      config.parallel = true;
    }
    if self.dump_dir.is_some() {
      config.dump_dir = self.dump_dir.clone();
    }
    Ok(config)
  }
}

fn run(args: &Args) -> pwm_tb::Result<bool> {
  let suite = Suite::new(args.suite_config()?);
  if args.list {
    for case in suite.cases() {
      println!(
        "{:<24} period={:<6} duty={:<6} {}",
        case.name, case.period, case.duty, case.polarity
      );
    }
    return Ok(true);
  }
  let report = suite.run(&mut TracingSink)?;
  println!(
    "{} cases: {} passed, {} failed, {} rejected",
    report.total(),
    report.passed,
    report.failed,
    report.rejected
  );
  Ok(report.is_success())
}

fn main() -> ExitCode {
  let args = Args::parse();
  logging::init(args.verbose);
  match run(&args) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::from(1),
    Err(err) => {
      let mut msg = err.to_string();
      let mut source = std::error::Error::source(&err);
      while let Some(cause) = source {
        msg.push_str(&format!(": {}", cause));
        source = cause.source();
      }
      error!("{}", msg);
      ExitCode::from(2)
    }
  }
}
