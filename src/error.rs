//! # Error module
//!
//! Contains the error type for the geocluster crate.

use thiserror::Error;

/// Geocluster error.
/// Represents the different errors that can occur while configuring or
/// querying a [`crate::Supercluster`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SuperclusterError {
    /// A build option rejected its argument.
    /// Carries the reason the option was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A query corner lacked coordinates.
    #[error("invalid coordinates: a query corner has no coordinates")]
    InvalidCoordinates,

    /// The caller's cancellation token fired before the query completed.
    #[error("query cancelled")]
    Cancelled,
}
