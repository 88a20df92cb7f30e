//! Error handling types
//!
//! Providers report every failure through [`Error`]. The public cache
//! surface collapses these into `false`/`None`, but the `try_*` primitives,
//! `raw_operate` and provider construction hand them to the caller intact.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for KVC
#[derive(Error, Debug)]
pub enum Error {
    /// The backing store could not be reached or rejected the request
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A server-side script failed to compile or raised at runtime
    #[error("Script error: {message}")]
    Script {
        /// Message reported by the store
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// The provider does not implement this operation
    #[error("Operation not supported by this provider: {operation}")]
    Unsupported {
        /// Name of the operation
        operation: String,
    },

    /// Provider-level failure that is not a transport problem
    #[error("Cache provider error: {message}")]
    Provider {
        /// Description of the provider error
        message: String,
    },

    /// The caller's cancellation token fired before the store answered
    #[error("Operation cancelled")]
    Cancelled,

    /// The caller's deadline elapsed before the store answered
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The provider was closed
    #[error("Cache provider is closed")]
    Closed,
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Create a provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a script error
    pub fn script<S: Into<String>>(message: S) -> Self {
        Self::Script {
            message: message.into(),
        }
    }
}

// Transport error creation methods
impl Error {
    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with source
    pub fn transport_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// True when the call was abandoned because of the caller's context
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// True for failures reaching or talking to the store
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Closed)
    }
}
