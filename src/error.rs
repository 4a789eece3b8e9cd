//! Error types for web-codecs.

use thiserror::Error;

/// Boxed error produced by a [`PublicData`](crate::facade::PublicData) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSONP marshal attempted without a callback name.
    #[error("A callback is required for JSONP")]
    MissingCallback,

    /// The codec is write-only.
    #[error("Unmarshalling an object is not supported for JSONP")]
    UnmarshalNotSupported,

    /// The object's public representation could not be produced.
    #[error("Facade error: {0}")]
    Facade(#[source] BoxError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// A registry was built without any codecs.
    #[error("Codec registry must contain at least one codec")]
    EmptyRegistry,
}

impl CodecError {
    /// Wrap an arbitrary error raised while building a public representation.
    pub fn facade<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        CodecError::Facade(err.into())
    }
}

/// Result type alias using CodecError.
pub type Result<T> = std::result::Result<T, CodecError>;
