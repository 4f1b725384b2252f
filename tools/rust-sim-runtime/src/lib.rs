pub mod runtime;

pub use runtime::*;

// Re-export dependencies to avoid duplication
pub use rand;
