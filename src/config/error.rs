//! Configuration error types.

use crate::builder::BuildError;
use thiserror::Error;

/// Errors that can occur while loading or building a machine definition
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The definition is not valid JSON or does not match the schema
    #[error("Failed to parse machine definition: {0}")]
    Parse(String),

    /// The definition could not be written out
    #[error("Failed to serialize machine definition: {0}")]
    Serialize(String),

    /// The definition describes an inconsistent machine
    #[error("Invalid machine definition: {0}")]
    Build(#[from] BuildError),
}
