//! Rules error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Invalid strategy window #{index}: start {start}s is after end {end}s")]
    InvalidWindow { index: usize, start: i32, end: i32 },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type RulesResult<T> = Result<T, RulesError>;
