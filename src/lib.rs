//! # web-codecs
//!
//! Codec selection and response marshalling for HTTP services.
//!
//! Given the signals an HTTP router extracts from a request (the `Accept`
//! header, a requested file extension, whether a JSONP callback was asked
//! for), this crate picks the codec that encodes the response and drives it
//! with the right options.
//!
//! ## Architecture
//!
//! - **Registry**: ordered, immutable list of codecs; the first is the default
//! - **Service**: resolves request/response codecs by walking the registry
//! - **Facade**: objects may expose a redacted public view before encoding
//!
//! ## Example
//!
//! ```
//! use web_codecs::codec::MarshalOptions;
//! use web_codecs::service::{CodecService, WebCodecService};
//!
//! let service = WebCodecService::new();
//!
//! let codec = service.codec_for_responding("text/html,application/json;q=0.9", "", false);
//! assert_eq!(codec.content_type(), "application/json");
//!
//! let body = service
//!     .marshal(codec.as_ref(), &vec!["a", "b"], &MarshalOptions::new())
//!     .unwrap();
//! assert_eq!(body, br#"["a","b"]"#);
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod facade;
pub mod registry;
pub mod service;

pub use codec::{Codec, MarshalOptions, TypedFormat};
pub use error::CodecError;
pub use facade::{PublicData, Subject};
pub use registry::CodecRegistry;
pub use service::{CodecService, WebCodecService};
