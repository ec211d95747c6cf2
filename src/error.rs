//! Error types for hex-pathfind

use thiserror::Error;

use crate::hex::Hex;

/// Priority queue errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    #[error("Heap capacity must be greater than zero")]
    ZeroCapacity,

    #[error("Cannot extract from an empty heap")]
    Empty,
}

/// Path search errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path not found from [{}, {}] to [{}, {}]", .start.x, .start.y, .goal.x, .goal.y)]
    NotFound { start: Hex, goal: Hex },

    #[error("Hex [{}, {}] is out of map bounds", .0.x, .0.y)]
    OutOfBounds(Hex),

    #[error("Search gave up after expanding {0} nodes")]
    ExpansionLimit(usize),

    #[error("Internal frontier error: {0}")]
    Internal(#[from] HeapError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T, E = PathError> = std::result::Result<T, E>;
