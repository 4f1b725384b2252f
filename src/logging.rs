//! Logging setup for the runner binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
  let default_directive = if verbose {
    "info,pwm_tb=debug,pwm_rtl=info"
  } else {
    "info"
  };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

  let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

  tracing_subscriber::registry()
    .with(stderr_layer)
    .with(filter)
    .init();
}
