//! Public-data facades.
//!
//! An object can expose a redacted, marshal-safe view of itself by
//! implementing [`PublicData`]. Callers hand the object to
//! [`CodecService::marshal_with_codec`](crate::service::CodecService::marshal_with_codec)
//! as a [`Subject::Facade`]; the facade runs first and only its output ever
//! reaches the codec. Plain values are passed as [`Subject::Plain`] and go
//! to the codec unchanged.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use web_codecs::codec::{JsonCodec, MarshalOptions};
//! use web_codecs::error::Result;
//! use web_codecs::facade::{PublicData, Subject};
//! use web_codecs::service::{CodecService, WebCodecService};
//!
//! struct Account {
//!     name: String,
//!     password_hash: String,
//! }
//!
//! impl PublicData for Account {
//!     fn public_data(&self, _options: &MarshalOptions) -> Result<Value> {
//!         Ok(json!({ "name": self.name }))
//!     }
//! }
//!
//! let account = Account { name: "Mat".into(), password_hash: "x".into() };
//! let service = WebCodecService::new();
//! let bytes = service
//!     .marshal_with_codec(&JsonCodec, Subject::facade(&account), &MarshalOptions::new())
//!     .unwrap();
//! assert_eq!(bytes, br#"{"name":"Mat"}"#);
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::codec::MarshalOptions;
use crate::error::Result;

/// Capability to produce a public representation of an object.
pub trait PublicData {
    /// Build the representation that should be marshalled in place of `self`.
    ///
    /// Receives the same options the codec will receive.
    ///
    /// # Errors
    ///
    /// Any error returned here is propagated to the caller unchanged and the
    /// codec is not invoked. Wrap foreign errors with
    /// [`CodecError::facade`](crate::error::CodecError::facade).
    fn public_data(&self, options: &MarshalOptions) -> Result<Value>;
}

/// The object handed to a marshal call.
pub enum Subject<'a> {
    /// Marshalled as-is.
    Plain(Value),
    /// Replaced by its public data before marshalling.
    Facade(&'a dyn PublicData),
}

impl<'a> Subject<'a> {
    /// Wrap any serializable value as a plain subject.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be represented as JSON.
    pub fn plain<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Subject::Plain(serde_json::to_value(value)?))
    }

    /// Wrap an object that exposes public data.
    pub fn facade(object: &'a dyn PublicData) -> Self {
        Subject::Facade(object)
    }

    /// Whether this subject carries a facade.
    pub fn has_facade(&self) -> bool {
        matches!(self, Subject::Facade(_))
    }

    /// Resolve to the value the codec should see.
    ///
    /// # Errors
    ///
    /// Returns the facade's error unchanged if it fails.
    pub fn into_value(self, options: &MarshalOptions) -> Result<Value> {
        match self {
            Subject::Plain(value) => Ok(value),
            Subject::Facade(object) => object.public_data(options),
        }
    }
}

impl From<Value> for Subject<'_> {
    fn from(value: Value) -> Self {
        Subject::Plain(value)
    }
}

impl<'a> From<&'a dyn PublicData> for Subject<'a> {
    fn from(object: &'a dyn PublicData) -> Self {
        Subject::Facade(object)
    }
}

impl std::fmt::Debug for Subject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
            Subject::Facade(_) => f.write_str("Facade(..)"),
        }
    }
}
