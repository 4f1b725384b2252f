use std::fs;

use pwm_tb::verify::{CaseOutcome, Rejection, TracingSink};
use pwm_tb::{InvalidConfig, Polarity, Suite, SuiteConfig};

fn write_suite(name: &str, body: &str) -> std::path::PathBuf {
  let path = std::env::temp_dir().join(format!("pwm-tb-{}-{}.toml", name, std::process::id()));
  fs::write(&path, body).unwrap();
  path
}

pub fn suite_file() {
  let path = write_suite(
    "suite",
    r#"
      seed = 3
      random_cases = 10
      max_period = 20
      cycles = 2

      [[cases]]
      name = "quarter"
      period = 8
      duty = 2
      polarity = "active-low"
    "#,
  );
  let config = SuiteConfig::load(&path).unwrap();
  fs::remove_file(&path).unwrap();

  let suite = Suite::new(config);
  let cases = suite.cases();
  let quarter = cases.iter().position(|c| c.name == "quarter").unwrap();
  assert_eq!(cases[quarter].polarity, Polarity::ActiveLow);
  assert!(cases.iter().filter(|c| c.name.starts_with("random-3-")).all(|c| c.period <= 20));

  let report = suite.run(&mut TracingSink).unwrap();
  assert!(report.is_success());
  assert_eq!(report.total(), cases.len());
}

pub fn rejected_file_case() {
  let path = write_suite(
    "rejected",
    r#"
      random_cases = 0
      include_directed = false

      [[cases]]
      name = "negative"
      period = 6
      duty = -2

      [[cases]]
      name = "ok"
      period = 6
      duty = 2
    "#,
  );
  let config = SuiteConfig::load(&path).unwrap();
  fs::remove_file(&path).unwrap();

  let report = Suite::new(config).run(&mut ()).unwrap();
  assert_eq!(report.total(), 2);
  assert_eq!(
    report.records[0].outcome,
    CaseOutcome::Rejected(Rejection::Config(InvalidConfig::NegativeDuty { duty: -2 }))
  );
  assert!(report.records[1].outcome.is_pass());
  assert!(!report.is_success());
}
