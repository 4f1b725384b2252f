mod config;
mod wave;

pub use config::*;
pub use wave::*;
