use pwm_tb::{Polarity, PwmConfig, PwmGenerator, Verdict, Verifier};
use sim_runtime::{ClockDriver, ScheduleError};

pub fn ten_three() {
  let mut generator = PwmGenerator::default();
  generator.configure(10, 3, Polarity::ActiveHigh).unwrap();
  let mut seen = vec![generator.level()];
  for _ in 0..30 {
    seen.push(generator.tick());
  }
  for chunk in seen[..30].chunks(10) {
    assert_eq!(
      chunk,
      [true, true, true, false, false, false, false, false, false, false]
    );
  }

  let config = *generator.config();
  let mut verifier = Verifier::new(generator);
  assert_eq!(verifier.run_case(config, 0, 3).unwrap(), Verdict::Pass);
}

pub fn duty_zero_by_level() {
  let config = PwmConfig::new(4, 0, Polarity::ActiveHigh).unwrap();
  let mut verifier = Verifier::new(PwmGenerator::default());
  let (verdict, log) = verifier.observe_case(config, 0, 4).unwrap();
  assert_eq!(verdict, Verdict::Pass);
  assert_eq!(log.len(), 21);
  assert_eq!(log.edge_count(), 0);
}

pub fn reconfigure_mid_run() {
  let mut generator = PwmGenerator::default();
  generator.configure(7, 4, Polarity::ActiveHigh).unwrap();
  let next = PwmConfig::new(5, 2, Polarity::ActiveHigh).unwrap();

  let mut driver = ClockDriver::new();
  driver.schedule(3, next, "tb").unwrap();
  let mut trace = Vec::new();
  driver.run(
    &mut generator,
    13,
    |g: &mut PwmGenerator, config| g.load(config),
    |cycle, level| trace.push((cycle, level as u8)),
  );

  let levels = trace.iter().map(|(_, l)| *l).collect::<Vec<_>>();
  // Cycles 0..=2 run the 7/4 configuration, cycle 3 is counter 0 of 5/2.
  assert_eq!(levels[..3], [1, 1, 1]);
  assert_eq!(levels[3..], [1, 1, 0, 0, 0, 1, 1, 0, 0, 0, 1]);
  assert_eq!(generator.config(), &next);
  assert!(generator.counter() < 5);
}

pub fn double_stimulus() {
  let config = PwmConfig::new(5, 2, Polarity::ActiveHigh).unwrap();
  let mut driver = ClockDriver::new();
  driver.schedule(4, config, "first").unwrap();
  let err = driver.schedule(4, config, "second").unwrap_err();
  let err = pwm_tb::Error::from(err);
  assert!(matches!(err, pwm_tb::Error::Stimulus(_)));
  assert_eq!(driver.pending(), 1);

  let err = driver.schedule(0, config, "late").unwrap_err();
  assert!(matches!(err, ScheduleError::Past { cycle: 0, current: 0 }));
}
