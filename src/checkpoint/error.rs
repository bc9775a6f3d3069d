//! Errors raised while saving or restoring a machine's position.

use thiserror::Error;

/// Why a checkpoint could not be encoded, decoded or restored.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("could not encode checkpoint: {0}")]
    SerializationFailed(String),

    #[error("could not decode checkpoint: {0}")]
    DeserializationFailed(String),

    /// Written by a different checkpoint format
    #[error("checkpoint format {found} cannot be read, expected {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Taken from a machine that had no active state yet
    #[error("checkpoint has no active state")]
    NoActiveState,

    /// Active state missing from the receiving machine's state registry
    #[error("checkpoint names state '{0}', which this machine does not register")]
    UnknownState(String),

    /// Pending transition missing from the receiving machine's transition registry
    #[error("checkpoint names transition '{0}', which this machine does not register")]
    UnknownTransition(String),
}
