/// Implemented RL algorithms
pub mod algo;

/// Environment
pub mod env;

/// Configuration errors
pub mod error;

/// Exploration policies
pub mod exploration;

/// Action-value storage
pub mod table;

/// Episode and training loops
pub mod train;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;
