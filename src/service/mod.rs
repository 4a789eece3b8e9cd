//! Codec service - the surface the HTTP layer talks to.
//!
//! The service answers two questions for every request:
//!
//! 1. Which codec decodes the request body? ([`CodecService::codec_for_request`])
//! 2. Which codec encodes the response? ([`CodecService::codec_for_responding`])
//!
//! and then drives the chosen codec through
//! [`CodecService::marshal_with_codec`] / [`CodecService::unmarshal_with_codec`].
//!
//! # Example
//!
//! ```
//! use web_codecs::codec::MarshalOptions;
//! use web_codecs::facade::Subject;
//! use web_codecs::service::{CodecService, WebCodecService};
//! use serde_json::json;
//!
//! let service = WebCodecService::new();
//!
//! // `?callback=cb` on the query string, no Accept header, no extension
//! let codec = service.codec_for_responding("", "", true);
//! assert_eq!(codec.content_type(), "text/javascript");
//!
//! let options = MarshalOptions::new().with_callback("cb");
//! let body = service
//!     .marshal_with_codec(codec.as_ref(), Subject::Plain(json!({"ok": true})), &options)
//!     .unwrap();
//! assert_eq!(body, br#"cb({"ok":true});"#);
//! ```

mod web;

use std::sync::Arc;

use serde_json::Value;

use crate::codec::{Codec, MarshalOptions};
use crate::error::Result;
use crate::facade::Subject;

pub use web::WebCodecService;

/// Codec resolution and marshalling for an HTTP server.
pub trait CodecService: Send + Sync {
    /// Find the codec for a request body's content type.
    ///
    /// Matching is case-insensitive. An empty content type is treated as JSON.
    /// Returns `None` when no codec matches; the caller picks a fallback.
    fn codec_for_request(&self, content_type: &str) -> Option<Arc<dyn Codec>>;

    /// Pick the codec for a response. Never fails.
    ///
    /// Checked in order, first match wins:
    ///
    /// 1. `accept` - comma-separated; a token matches a codec when it contains
    ///    the codec's content type (case-insensitive)
    /// 2. `extension` - equals one of the codec's file extensions (case-insensitive)
    /// 3. `wants_callback` - first codec that can marshal with a callback
    /// 4. the default codec
    ///
    /// Within each step codecs are tried in registry order.
    fn codec_for_responding(
        &self,
        accept: &str,
        extension: &str,
        wants_callback: bool,
    ) -> Arc<dyn Codec>;

    /// Marshal a subject with the given codec.
    ///
    /// A [`Subject::Facade`] is replaced by its public data first; if that
    /// fails the error is returned and the codec is never called.
    fn marshal_with_codec(
        &self,
        codec: &dyn Codec,
        subject: Subject<'_>,
        options: &MarshalOptions,
    ) -> Result<Vec<u8>>;

    /// Unmarshal bytes with the given codec.
    fn unmarshal_with_codec(&self, codec: &dyn Codec, data: &[u8]) -> Result<Value>;
}
