//! Errors raised at the configuration boundary of the physics core.

use thiserror::Error;

/// Errors that can occur while configuring the physics core.
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// The configuration text is not valid JSON for `PhysicsConfig`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// A map cell size must be finite and strictly positive.
    #[error("invalid map box size: {0}")]
    InvalidBoxSize(f64),

    /// An epsilon must be finite and non-negative.
    #[error("invalid epsilon `{name}`: {value}")]
    InvalidEpsilon {
        /// Name of the configuration field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The text does not name a contact mode.
    #[error("unknown contact mode: {0:?}")]
    UnknownContactMode(String),
}

impl PhysicsError {
    /// Creates an invalid epsilon error.
    #[must_use]
    pub const fn invalid_epsilon(name: &'static str, value: f64) -> Self {
        Self::InvalidEpsilon { name, value }
    }
}

/// Result type for the fallible operations of the crate.
pub type PhysicsResult<T> = Result<T, PhysicsError>;
