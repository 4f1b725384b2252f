mod clock;
mod utils;
mod xeq;

pub use clock::*;
pub use utils::*;
pub use xeq::*;
