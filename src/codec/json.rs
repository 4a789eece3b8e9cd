//! JSON codec using `serde_json`.

use serde_json::Value;

use super::{Codec, MarshalOptions};
use crate::constants::{CONTENT_TYPE_JSON, FILE_EXTENSION_JSON};
use crate::error::Result;

/// JSON codec, the default codec for requests and responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &str {
        CONTENT_TYPE_JSON
    }

    fn file_extensions(&self) -> &[&str] {
        &[FILE_EXTENSION_JSON]
    }

    /// Encode a value as compact JSON. Options are ignored.
    #[inline]
    fn marshal(&self, value: &Value, _options: &MarshalOptions) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    #[inline]
    fn unmarshal(&self, data: &[u8]) -> Result<Value> {
        Ok(serde_json::from_slice(data)?)
    }
}
