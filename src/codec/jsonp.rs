//! JSONP codec - JSON wrapped in a callback invocation.
//!
//! Output shape:
//!
//! - `cb({"Name":"Mat"});` when only a callback is given
//! - `cb({"Name":"Mat"},"ctx");` when a client context is also given
//!
//! The client context is inserted between quotes exactly as supplied, with
//! no escaping. A context containing `"` or `</script>` will produce broken
//! or unsafe script; callers must only pass trusted, quote-free values.
//!
//! JSONP is a response format only. [`Codec::unmarshal`] always fails with
//! [`CodecError::UnmarshalNotSupported`].

use serde_json::Value;

use super::{Codec, MarshalOptions};
use crate::constants::{CONTENT_TYPE_JAVASCRIPT, FILE_EXTENSION_JAVASCRIPT};
use crate::error::{CodecError, Result};

/// JSONP codec for callback-style responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonpCodec;

impl Codec for JsonpCodec {
    fn content_type(&self) -> &str {
        CONTENT_TYPE_JAVASCRIPT
    }

    fn file_extensions(&self) -> &[&str] {
        &[FILE_EXTENSION_JAVASCRIPT]
    }

    fn can_marshal_with_callback(&self) -> bool {
        true
    }

    /// Encode a value as JSONP.
    ///
    /// # Errors
    ///
    /// - [`CodecError::MissingCallback`] if `options` is empty or has no string `callback`
    /// - [`CodecError::Json`] if the value cannot be encoded
    fn marshal(&self, value: &Value, options: &MarshalOptions) -> Result<Vec<u8>> {
        if options.is_empty() {
            return Err(CodecError::MissingCallback);
        }

        let json = serde_json::to_vec(value)?;
        let callback = options.callback().ok_or(CodecError::MissingCallback)?;

        let mut out = Vec::with_capacity(callback.len() + json.len() + 4);
        out.extend_from_slice(callback.as_bytes());
        out.push(b'(');
        out.extend_from_slice(&json);
        // Raw insertion, see module docs.
        if let Some(context) = options.client_context() {
            out.extend_from_slice(b",\"");
            out.extend_from_slice(context.as_bytes());
            out.push(b'"');
        }
        out.extend_from_slice(b");");

        Ok(out)
    }

    fn unmarshal(&self, _data: &[u8]) -> Result<Value> {
        Err(CodecError::UnmarshalNotSupported)
    }
}
