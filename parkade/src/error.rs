//! Error types for the parkade library.
//!
//! This module provides the error hierarchy shared by the registry, the
//! allocation engine, configuration loading and the HTTP surface, using
//! `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::spot::SpotType;

/// Result type alias for operations that may fail with a parkade error.
///
/// # Examples
///
/// ```
/// use parkade::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the parkade library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// The database stayed locked for longer than the busy timeout.
    #[error("database lock timeout: {details}")]
    LockTimeout {
        /// Message reported by `SQLite`.
        details: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON encoding or decoding error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// No open session exists for the plate.
    #[error("vehicle not found: no open session for license plate {plate}")]
    VehicleNotFound {
        /// The license plate that was looked up.
        plate: String,
    },

    /// The plate already has an open session.
    #[error("vehicle {plate} is already parked")]
    AlreadyParked {
        /// The license plate with an open session.
        plate: String,
    },

    /// Every spot of the requested type is occupied.
    #[error("no available spot of type {spot_type}")]
    NoAvailableSpot {
        /// The requested spot type.
        spot_type: SpotType,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The HTTP server could not be started.
    #[error("failed to start server on {address}: {reason}")]
    ServerStart {
        /// The address the server tried to bind.
        address: String,
        /// The reason binding failed.
        reason: String,
    },
}

/// A single field-level validation failure.
///
/// Request validation collects these so that every problem with a request
/// body can be reported at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The offending field, in wire (camelCase) naming.
    pub field: String,
    /// Human readable description.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

// Busy and locked failures only happen once busy_timeout has elapsed, so they
// are reported as lock timeouts rather than generic database errors.
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
            if matches!(
                failure.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) {
                return Self::LockTimeout {
                    details: message.clone().unwrap_or_else(|| failure.to_string()),
                };
            }
        }
        Self::Database(err)
    }
}

impl Error {
    /// Check if the error means a requested entity does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::Error;
    ///
    /// let err = Error::VehicleNotFound { plate: "KA-01".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::VehicleNotFound { .. })
    }

    /// Check if the error is a state conflict (already parked or lot full).
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::{Error, SpotType};
    ///
    /// let err = Error::NoAvailableSpot { spot_type: SpotType::Large };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyParked { .. } | Self::NoAvailableSpot { .. }
        )
    }

    /// Check if retrying the same request later could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NoAvailableSpot { .. } | Self::LockTimeout { .. }
        )
    }

    /// Check if the error was caused by invalid caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
