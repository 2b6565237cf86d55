use thiserror::Error;

/// Rejected hyperparameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for `{name}`: {value} is not in the interval {interval}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        interval: &'static str,
    },
    #[error("minimum exploration rate {min} exceeds the initial exploration rate {initial}")]
    MinExceedsInitial { min: f64, initial: f64 },
    #[error("default action value must be finite, got {0}")]
    NonFiniteDefault(f64),
}
