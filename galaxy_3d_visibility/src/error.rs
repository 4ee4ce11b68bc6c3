//! Error types for the Galaxy3D visibility engine
//!
//! This module defines the error types used throughout the crate,
//! including configuration, initialization and registration failures.

use std::fmt;

/// Result type for visibility engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a registration request was refused.
///
/// A rejected registration never mutates any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The identity does not resolve to a live entity
    NullIdentity,
    /// The identity already maps to a live index
    AlreadyRegistered,
    /// The entity owns neither a drawable nor a LOD group
    NoGeometry,
    /// The entity's layer is excluded by the configured layer mask
    FilteredLayer,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NullIdentity => write!(f, "entity is null or destroyed"),
            RejectReason::AlreadyRegistered => write!(f, "entity is already registered"),
            RejectReason::NoGeometry => write!(f, "entity has neither a drawable nor a LOD group"),
            RejectReason::FilteredLayer => write!(f, "entity layer is excluded by the layer mask"),
        }
    }
}

/// Visibility engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration cannot be used (no camera, no candidates, ...)
    InvalidConfiguration(String),

    /// The system is inert: no oracle was configured
    NotInitialized,

    /// Entity registration was refused
    RegistrationRejected(RejectReason),

    /// Camera index out of range
    InvalidCamera(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::NotInitialized => write!(f, "Visibility system not initialized"),
            Error::RegistrationRejected(reason) => write!(f, "Registration rejected: {}", reason),
            Error::InvalidCamera(index) => write!(f, "Invalid camera index: {}", index),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
