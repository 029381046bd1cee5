//! Error types and result types for filter conversion and its helpers.
//!
//! The converter itself degrades silently by default. Errors are only produced by the
//! strict conversion mode (see [`crate::options::TruncationPolicy`]) and by the helpers
//! that sit at the boundary with a store facade (collection lookup, id parsing).

use bson::error::Error as BsonError;
use thiserror::Error;

/// Represents all possible errors raised around filter conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// No collection name could be derived from the record or an explicit override.
    #[error("Collection name not found: the filter does not expose a collection and no override was given")]
    CollectionNameNotFound,
    /// A value was required to expose a collection name but does not.
    #[error("Invalid document: {0} does not expose a collection name")]
    InvalidDocument(String),
    /// An identifier was neither an object id nor a 24 character hex string.
    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),
    /// A sequence walk stopped at an element of an unsupported kind (strict mode only).
    #[error("Unsupported element of kind {kind} in sequence at {path}")]
    UnsupportedElement {
        /// Dotted path of the sequence.
        path: String,
        /// Kind name of the offending element.
        kind: &'static str,
    },
    /// Nested objects went deeper than the configured limit (strict mode only).
    #[error("Nesting depth limit {limit} exceeded at {path}")]
    DepthExceeded {
        /// Dotted path at which the limit was hit.
        path: String,
        /// The configured limit.
        limit: usize,
    },
    /// Serialization error when producing a BSON value.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A specialized `Result` type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

impl From<BsonError> for FilterError {
    fn from(err: BsonError) -> Self {
        FilterError::Serialization(err.to_string())
    }
}
