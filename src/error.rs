//! Error types for configuration and session failures

use thiserror::Error;

/// Rejected configuration. Raised before any entity is spawned.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A field that must be strictly positive was zero
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    /// A real-valued field was out of range or not finite
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// Amount range with min above max
    #[error("amount range is empty: min {min} > max {max}")]
    EmptyAmountRange { min: f64, max: f64 },

    /// Unknown motion mode name
    #[error("unknown motion mode '{0}' (expected reflective or gravity)")]
    UnknownMode(String),

    /// A command-line flag value could not be parsed
    #[error("invalid value '{value}' for --{flag}")]
    InvalidFlag { flag: String, value: String },

    /// A JSON config document could not be parsed
    #[error("invalid config document: {0}")]
    Json(String),
}

/// Fatal session failure
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Spawn policy broke its contract (wrong population or ids)
    #[error("spawn policy returned {got} collectibles with ids not matching 0..{expected}")]
    SpawnContract { expected: usize, got: usize },

    /// Motion produced a NaN or infinite position/velocity
    #[error("collectible {id} reached a non-finite state at tick {tick}")]
    NonFinite { id: u32, tick: u64 },
}
