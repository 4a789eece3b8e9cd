//! Marshal options passed opaquely from the caller to a codec.
//!
//! Only [`JsonpCodec`](super::JsonpCodec) reads options today, and it
//! recognizes exactly two keys:
//!
//! | Key | Constant | Type | Required |
//! |---|---|---|---|
//! | `callback` | [`OPTION_KEY_CALLBACK`] | string | yes |
//! | `clientContext` | [`OPTION_KEY_CLIENT_CONTEXT`] | string | no |
//!
//! Other codecs ignore the map entirely. A new codec that wants options must
//! not reuse these keys with a different meaning.

use std::collections::HashMap;

use serde_json::Value;

use crate::constants::{OPTION_KEY_CALLBACK, OPTION_KEY_CLIENT_CONTEXT};

/// String-keyed options for a single marshal call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarshalOptions {
    entries: HashMap<String, Value>,
}

impl MarshalOptions {
    /// Create an empty options map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSONP callback name.
    pub fn with_callback(self, callback: impl Into<String>) -> Self {
        self.with(OPTION_KEY_CALLBACK, Value::String(callback.into()))
    }

    /// Set the JSONP client context string.
    pub fn with_client_context(self, context: impl Into<String>) -> Self {
        self.with(OPTION_KEY_CLIENT_CONTEXT, Value::String(context.into()))
    }

    /// Builder-style insert of an arbitrary option.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an option, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get an option by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get an option by key if it holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The JSONP callback name, if present and a string.
    pub fn callback(&self) -> Option<&str> {
        self.get_str(OPTION_KEY_CALLBACK)
    }

    /// The JSONP client context, if present and a string.
    pub fn client_context(&self) -> Option<&str> {
        self.get_str(OPTION_KEY_CLIENT_CONTEXT)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MarshalOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
