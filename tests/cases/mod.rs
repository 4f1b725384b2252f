pub mod properties;
pub mod runner;
pub mod scenarios;
