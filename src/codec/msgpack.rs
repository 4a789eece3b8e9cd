//! MsgPack codec using `rmp-serde`.
//!
//! Always encodes with `to_vec_named`, so structs and JSON objects become
//! MsgPack maps keyed by field name rather than positional arrays. Clients
//! decoding with `@msgpack/msgpack` or similar expect the map format.
//!
//! # Binary data
//!
//! [`serde_json::Value`] has no bytes variant. Through the untyped
//! [`Codec`] methods a `bin` field decodes to an array of byte values, and
//! re-encodes as an array. Use [`MsgPackCodec::encode`] /
//! [`MsgPackCodec::decode`] (or the typed helpers on
//! [`WebCodecService`](crate::service::WebCodecService), which route to them)
//! to keep `bin` intact.
//!
//! # Example
//!
//! ```
//! use web_codecs::codec::MsgPackCodec;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Message {
//!     id: u32,
//!     content: String,
//! }
//!
//! let msg = Message { id: 42, content: "hello".to_string() };
//! let encoded = MsgPackCodec::encode(&msg).unwrap();
//! let decoded: Message = MsgPackCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, msg);
//! ```

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;

use super::{Codec, MarshalOptions, TypedFormat};
use crate::constants::{CONTENT_TYPE_MSGPACK, FILE_EXTENSION_MSGPACK};
use crate::error::Result;

/// MessagePack codec for compact binary responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes.
    ///
    /// Uses `to_vec_named` for struct-as-map format.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    #[inline]
    pub fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        // to_vec_named, NOT to_vec
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes cannot be deserialized to type T.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

impl Codec for MsgPackCodec {
    fn content_type(&self) -> &str {
        CONTENT_TYPE_MSGPACK
    }

    fn file_extensions(&self) -> &[&str] {
        &[FILE_EXTENSION_MSGPACK]
    }

    fn typed_format(&self) -> TypedFormat {
        TypedFormat::MsgPack
    }

    #[inline]
    fn marshal(&self, value: &Value, _options: &MarshalOptions) -> Result<Vec<u8>> {
        Self::encode(value)
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value> {
        let BinTolerant(value) = Self::decode(data)?;
        Ok(value)
    }
}

/// A [`Value`] that also accepts MsgPack `bin`, as an array of byte values.
struct BinTolerant(Value);

impl<'de> Deserialize<'de> for BinTolerant {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BinTolerantVisitor).map(BinTolerant)
    }
}

struct BinTolerantVisitor;

impl<'de> Visitor<'de> for BinTolerantVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any MessagePack value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        // NaN and infinities have no JSON form
        Ok(serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Value, E> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        BinTolerant::deserialize(deserializer).map(|v| v.0)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(BinTolerant(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = serde_json::Map::new();
        while let Some((key, BinTolerant(value))) = map.next_entry::<String, BinTolerant>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}
