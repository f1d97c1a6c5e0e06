//! Error types for domain encoding.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Error type for domain encoding and statistics packaging.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A collection did not have the required number of elements, or two
    /// parallel collections disagree in length.
    #[error("Size mismatch in {context}: expected {expected}, got {actual}")]
    SizeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A value could not be formatted or coerced to the required type.
    #[error("Type mismatch in {context}: {message}")]
    TypeMismatch { context: String, message: String },

    /// Params or document (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while reading or writing params.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error raised while encoding a named feature.
    #[error("Feature `{feature}`: {source}")]
    Feature {
        feature: String,
        #[source]
        source: Box<DomainError>,
    },
}

/// Coarse classification of a [`DomainError`], looking through feature wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SizeMismatch,
    TypeMismatch,
    Serialization,
    Io,
}

impl DomainError {
    /// Create a SizeMismatch error.
    pub fn size_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create a TypeMismatch error.
    pub fn type_mismatch(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Attach the name of the feature being encoded.
    ///
    /// Already-wrapped errors are returned unchanged.
    pub fn in_feature(self, feature: impl Into<String>) -> Self {
        match self {
            err @ DomainError::Feature { .. } => err,
            err => DomainError::Feature {
                feature: feature.into(),
                source: Box::new(err),
            },
        }
    }

    /// The kind of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            DomainError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            DomainError::Serialization(_) => ErrorKind::Serialization,
            DomainError::Io(_) => ErrorKind::Io,
            DomainError::Feature { source, .. } => source.kind(),
        }
    }

    /// Name of the feature this error was raised for, if known.
    pub fn feature(&self) -> Option<&str> {
        match self {
            DomainError::Feature { feature, .. } => Some(feature),
            _ => None,
        }
    }
}
