use pwm_tb::verify::reconstruct;
use pwm_tb::{Polarity, PwmConfig, PwmGenerator, Verifier};

pub fn period_is_exact() {
  let mut verifier = Verifier::new(PwmGenerator::default());
  for period in 2..40 {
    for duty in 1..period {
      let config = PwmConfig::new(period, duty, Polarity::ActiveHigh).unwrap();
      let (verdict, log) = verifier.observe_case(config, 0, 2).unwrap();
      assert!(verdict.is_pass(), "{}: {:?}", config, verdict);
      for cycle in reconstruct(&log, Polarity::ActiveHigh).unwrap() {
        assert_eq!(cycle.period, period as u64);
      }
    }
  }
}

pub fn polarity_inverts_every_tick() {
  let mut verifier = Verifier::new(PwmGenerator::default());
  for (period, duty) in [(10, 3), (7, 3), (2, 1), (5, 0), (5, 5)] {
    let high = PwmConfig::new(period, duty, Polarity::ActiveHigh).unwrap();
    let low = high.with_polarity(Polarity::ActiveLow);
    let (vh, high_log) = verifier.observe_case(high, 0, 3).unwrap();
    let (vl, low_log) = verifier.observe_case(low, 0, 3).unwrap();
    assert!(vh.is_pass() && vl.is_pass());
    assert_eq!(high_log.len(), low_log.len());
    for (h, l) in high_log.iter().zip(low_log.iter()) {
      assert_eq!(h.tick_index, l.tick_index);
      assert_eq!(h.level, !l.level);
    }
    if !high.is_degenerate() {
      let ph = reconstruct(&high_log, Polarity::ActiveHigh).unwrap();
      let pl = reconstruct(&low_log, Polarity::ActiveLow).unwrap();
      assert_eq!(ph, pl);
    }
  }
}

pub fn degenerate_windows() {
  let mut verifier = Verifier::new(PwmGenerator::default());
  for period in 1..20 {
    for (duty, polarity) in [
      (0, Polarity::ActiveHigh),
      (period, Polarity::ActiveHigh),
      (0, Polarity::ActiveLow),
      (period, Polarity::ActiveLow),
    ] {
      let config = PwmConfig::new(period, duty, polarity).unwrap();
      let expected = config.constant_level().unwrap();
      let (verdict, log) = verifier.observe_case(config, 0, 1).unwrap();
      assert!(verdict.is_pass());
      assert!(log.last_tick() >= 2 * period as usize);
      assert!(log.iter().all(|o| o.level == expected));
    }
  }
}
