//! Codec module - content encoders for HTTP response bodies.
//!
//! This module provides the [`Codec`] trait and the installed codecs:
//!
//! - [`JsonCodec`] - `application/json` via `serde_json`
//! - [`JsonpCodec`] - `text/javascript`, JSON wrapped in a callback (write-only)
//! - [`MsgPackCodec`] - `application/x-msgpack` via `rmp-serde` (`to_vec_named`)
//!
//! # Design
//!
//! Codecs are stateless trait objects. The values crossing the trait boundary
//! are [`serde_json::Value`] so that a registry can hold heterogeneous codecs
//! behind `Arc<dyn Codec>`; typed helpers live on
//! [`WebCodecService`](crate::service::WebCodecService).
//!
//! # Example
//!
//! ```
//! use web_codecs::codec::{Codec, JsonpCodec, MarshalOptions};
//! use serde_json::json;
//!
//! let options = MarshalOptions::new().with_callback("cb");
//! let bytes = JsonpCodec.marshal(&json!({"Name": "Mat"}), &options).unwrap();
//! assert_eq!(bytes, br#"cb({"Name":"Mat"});"#);
//! ```

mod json;
mod jsonp;
mod msgpack;
mod options;

use std::fmt::Debug;

use serde_json::Value;

use crate::error::Result;

pub use json::JsonCodec;
pub use jsonp::JsonpCodec;
pub use msgpack::MsgPackCodec;
pub use options::MarshalOptions;

/// Encoding used by the typed helpers on
/// [`WebCodecService`](crate::service::WebCodecService).
///
/// `Value` goes through [`Codec::marshal`] / [`Codec::unmarshal`]. `MsgPack`
/// bypasses the [`Value`] boundary and calls `rmp-serde` on the caller's type
/// directly, so byte buffers stay MessagePack `bin` on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedFormat {
    /// Typed values are converted to and from [`Value`].
    Value,
    /// Typed values are encoded with [`MsgPackCodec::encode`] / [`MsgPackCodec::decode`].
    MsgPack,
}

/// A named encoder/decoder for one content type.
///
/// Implementations are constructed once and shared read-only across requests.
pub trait Codec: Send + Sync + Debug {
    /// Canonical MIME type, lowercase.
    fn content_type(&self) -> &str;

    /// File extensions associated with this codec, lowercase and without a dot.
    fn file_extensions(&self) -> &[&str];

    /// Whether this codec can produce a response wrapped in a callback.
    fn can_marshal_with_callback(&self) -> bool {
        false
    }

    /// How typed values reach this codec.
    fn typed_format(&self) -> TypedFormat {
        TypedFormat::Value
    }

    /// Encode a value into response bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be encoded or required options are missing.
    fn marshal(&self, value: &Value, options: &MarshalOptions) -> Result<Vec<u8>>;

    /// Decode request bytes into a value.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are malformed or the codec is write-only.
    fn unmarshal(&self, data: &[u8]) -> Result<Value>;
}
