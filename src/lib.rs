pub mod error;
pub mod logging;
pub mod sim;
pub mod verify;

pub use error::{Error, Result};
pub use pwm_rtl::{InvalidConfig, Polarity, PwmConfig, PwmDevice, PwmGenerator};
pub use sim::SuiteConfig;
pub use verify::{run_suite, run_suite_parallel, CaseSpec, Suite, SuiteReport, Verdict, Verifier};

#[cfg(test)]
mod tests;
