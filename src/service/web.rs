//! Registry-backed [`CodecService`] implementation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::CodecService;
use crate::codec::{Codec, MarshalOptions, MsgPackCodec, TypedFormat};
use crate::constants::CONTENT_TYPE_JSON;
use crate::error::Result;
use crate::facade::Subject;
use crate::registry::CodecRegistry;

/// Codec service over an immutable [`CodecRegistry`].
///
/// Holds no per-request state; share one instance across all requests.
#[derive(Debug, Clone, Default)]
pub struct WebCodecService {
    registry: CodecRegistry,
}

impl WebCodecService {
    /// Create a service over the installed codecs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service over a custom registry.
    pub fn with_registry(registry: CodecRegistry) -> Self {
        Self { registry }
    }

    /// The registry this service resolves against.
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Marshal any serializable value with the given codec.
    ///
    /// Codecs reporting [`TypedFormat::MsgPack`] encode `value` directly, so
    /// byte buffers stay MessagePack `bin`.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be represented as JSON or the codec fails.
    pub fn marshal<T: Serialize + ?Sized>(
        &self,
        codec: &dyn Codec,
        value: &T,
        options: &MarshalOptions,
    ) -> Result<Vec<u8>> {
        match codec.typed_format() {
            TypedFormat::MsgPack => MsgPackCodec::encode(value),
            TypedFormat::Value => self.marshal_with_codec(codec, Subject::plain(value)?, options),
        }
    }

    /// Unmarshal bytes with the given codec into a typed value.
    ///
    /// # Errors
    ///
    /// Returns error if the codec fails or the decoded value does not fit `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self, codec: &dyn Codec, data: &[u8]) -> Result<T> {
        match codec.typed_format() {
            TypedFormat::MsgPack => MsgPackCodec::decode(data),
            TypedFormat::Value => {
                let value = self.unmarshal_with_codec(codec, data)?;
                Ok(serde_json::from_value(value)?)
            }
        }
    }

    fn by_accept(&self, accept: &str) -> Option<&Arc<dyn Codec>> {
        // Registered content types are lowercase.
        let accept = accept.to_ascii_lowercase();
        self.registry.codecs().iter().find(|codec| {
            accept
                .split(',')
                .any(|token| token.contains(codec.content_type()))
        })
    }

    fn by_extension(&self, extension: &str) -> Option<&Arc<dyn Codec>> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        self.registry.codecs().iter().find(|codec| {
            codec
                .file_extensions()
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }

    fn by_callback(&self) -> Option<&Arc<dyn Codec>> {
        self.registry
            .codecs()
            .iter()
            .find(|codec| codec.can_marshal_with_callback())
    }
}

impl CodecService for WebCodecService {
    fn codec_for_request(&self, content_type: &str) -> Option<Arc<dyn Codec>> {
        let content_type = if content_type.is_empty() {
            CONTENT_TYPE_JSON
        } else {
            content_type
        };

        let codec = self.registry.get(content_type).cloned();
        tracing::trace!(
            "Request codec for {:?}: found={}",
            content_type,
            codec.is_some()
        );
        codec
    }

    fn codec_for_responding(
        &self,
        accept: &str,
        extension: &str,
        wants_callback: bool,
    ) -> Arc<dyn Codec> {
        if !accept.is_empty() {
            if let Some(codec) = self.by_accept(accept) {
                tracing::debug!("Accept {:?} matched {}", accept, codec.content_type());
                return Arc::clone(codec);
            }
        }

        if !extension.is_empty() {
            if let Some(codec) = self.by_extension(extension) {
                tracing::debug!("Extension {:?} matched {}", extension, codec.content_type());
                return Arc::clone(codec);
            }
        }

        if wants_callback {
            if let Some(codec) = self.by_callback() {
                tracing::debug!("Callback requested, using {}", codec.content_type());
                return Arc::clone(codec);
            }
        }

        let codec = self.registry.default_codec();
        tracing::debug!("No match, using default codec {}", codec.content_type());
        Arc::clone(codec)
    }

    fn marshal_with_codec(
        &self,
        codec: &dyn Codec,
        subject: Subject<'_>,
        options: &MarshalOptions,
    ) -> Result<Vec<u8>> {
        if subject.has_facade() {
            tracing::trace!("Applying public data facade before {}", codec.content_type());
        }

        let value = subject.into_value(options)?;
        codec.marshal(&value, options)
    }

    fn unmarshal_with_codec(&self, codec: &dyn Codec, data: &[u8]) -> Result<Value> {
        codec.unmarshal(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonCodec, JsonpCodec};
    use crate::constants::*;
    use crate::error::CodecError;
    use serde::Deserialize;
    use serde_json::json;

    /// A second callback-capable codec registered after JSONP.
    #[derive(Debug)]
    struct ShadowCodec;

    impl Codec for ShadowCodec {
        fn content_type(&self) -> &str {
            "application/x-shadow"
        }

        fn file_extensions(&self) -> &[&str] {
            &["js", "shadow"]
        }

        fn can_marshal_with_callback(&self) -> bool {
            true
        }

        fn marshal(&self, _value: &Value, _options: &MarshalOptions) -> Result<Vec<u8>> {
            Ok(b"shadow".to_vec())
        }

        fn unmarshal(&self, _data: &[u8]) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    fn service() -> WebCodecService {
        WebCodecService::new()
    }

    #[test]
    fn test_codec_for_request() {
        let codec = service().codec_for_request(CONTENT_TYPE_JSON).unwrap();
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);
    }

    #[test]
    fn test_codec_for_request_case_insensitive() {
        let service = service();

        for codec in service.registry().codecs() {
            let upper = codec.content_type().to_uppercase();
            let lower = codec.content_type().to_lowercase();

            let found = service.codec_for_request(&upper).unwrap();
            assert_eq!(found.content_type(), codec.content_type());

            let found = service.codec_for_request(&lower).unwrap();
            assert_eq!(found.content_type(), codec.content_type());
        }
    }

    #[test]
    fn test_codec_for_request_empty_assumes_json() {
        let codec = service().codec_for_request("").unwrap();
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);
    }

    #[test]
    fn test_codec_for_request_not_found() {
        assert!(service().codec_for_request("text/xml").is_none());
    }

    #[test]
    fn test_codec_for_request_empty_without_json() {
        let registry = CodecRegistry::builder().codec(MsgPackCodec).build().unwrap();
        let service = WebCodecService::with_registry(registry);

        assert!(service.codec_for_request("").is_none());
    }

    #[test]
    fn test_codec_for_responding_default() {
        let codec = service().codec_for_responding("", "", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);
    }

    #[test]
    fn test_codec_for_responding_accept() {
        let service = service();

        let codec = service.codec_for_responding(
            "something/something,application/json,text/xml",
            "",
            false,
        );
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);

        let codec = service.codec_for_responding(
            "something/something,application/JSON,text/xml",
            "",
            false,
        );
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);

        let codec = service.codec_for_responding(
            "something/something,text/javascript,text/xml",
            "",
            false,
        );
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);
    }

    #[test]
    fn test_codec_for_responding_accept_with_parameters() {
        let codec = service().codec_for_responding(
            "text/html;q=0.9, application/x-msgpack;q=0.8",
            "",
            false,
        );
        assert_eq!(codec.content_type(), CONTENT_TYPE_MSGPACK);
    }

    #[test]
    fn test_codec_for_responding_registry_order_beats_token_order() {
        // JSONP token comes first, but JSON is registered first.
        let codec = service().codec_for_responding("text/javascript,application/json", "", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);
    }

    #[test]
    fn test_codec_for_responding_accept_beats_extension_and_callback() {
        let codec = service().codec_for_responding("application/x-msgpack", "js", true);
        assert_eq!(codec.content_type(), CONTENT_TYPE_MSGPACK);
    }

    #[test]
    fn test_codec_for_responding_garbage_accept_falls_through() {
        let service = service();

        let codec = service.codec_for_responding("  ,garbage, */*", "js", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);

        let codec = service.codec_for_responding("text/html", "", true);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);

        let codec = service.codec_for_responding("text/html", "xml", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);
    }

    #[test]
    fn test_codec_for_responding_extension() {
        let service = service();

        let codec = service.codec_for_responding("", FILE_EXTENSION_JSON, false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);

        let codec = service.codec_for_responding("", "js", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);

        let codec = service.codec_for_responding("", "JS", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);

        let codec = service.codec_for_responding("", ".msgpack", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_MSGPACK);
    }

    #[test]
    fn test_codec_for_responding_extension_beats_callback() {
        let codec = service().codec_for_responding("", "msgpack", true);
        assert_eq!(codec.content_type(), CONTENT_TYPE_MSGPACK);
    }

    #[test]
    fn test_codec_for_responding_callback() {
        let codec = service().codec_for_responding("", "", true);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);
        assert!(codec.can_marshal_with_callback());
    }

    #[test]
    fn test_first_registered_wins_on_shadowing() {
        let registry = CodecRegistry::builder()
            .codec(JsonCodec)
            .codec(JsonpCodec)
            .codec(ShadowCodec)
            .build()
            .unwrap();
        let service = WebCodecService::with_registry(registry);

        let codec = service.codec_for_responding("", "js", false);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);

        let codec = service.codec_for_responding("", "", true);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JAVASCRIPT);

        let codec = service.codec_for_responding("", "shadow", false);
        assert_eq!(codec.content_type(), "application/x-shadow");
    }

    #[test]
    fn test_callback_without_capable_codec_uses_default() {
        let registry = CodecRegistry::builder()
            .codec(JsonCodec)
            .codec(MsgPackCodec)
            .build()
            .unwrap();
        let service = WebCodecService::with_registry(registry);

        let codec = service.codec_for_responding("", "", true);
        assert_eq!(codec.content_type(), CONTENT_TYPE_JSON);
    }

    #[test]
    fn test_typed_marshal_and_unmarshal() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Person {
            name: String,
            age: u32,
        }

        let service = service();
        let person = Person {
            name: "Mat".to_string(),
            age: 30,
        };

        let bytes = service
            .marshal(&JsonCodec, &person, &MarshalOptions::new())
            .unwrap();
        assert_eq!(bytes, br#"{"name":"Mat","age":30}"#);

        let packed = service
            .marshal(&MsgPackCodec, &person, &MarshalOptions::new())
            .unwrap();
        let decoded: Person = service.unmarshal(&MsgPackCodec, &packed).unwrap();
        assert_eq!(decoded, person);
    }

    #[test]
    fn test_typed_msgpack_keeps_bin_fields() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Upload {
            #[serde(with = "serde_bytes")]
            data: Vec<u8>,
        }

        let service = service();
        let codec = service.codec_for_responding("", "msgpack", false);
        let upload = Upload {
            data: vec![1, 2, 3],
        };

        let bytes = service
            .marshal(codec.as_ref(), &upload, &MarshalOptions::new())
            .unwrap();
        assert!(
            bytes.ends_with(&[0xc4, 0x03, 0x01, 0x02, 0x03]),
            "Expected bin8 payload, got {:02X?}",
            bytes
        );

        let decoded: Upload = service.unmarshal(codec.as_ref(), &bytes).unwrap();
        assert_eq!(decoded, upload);

        let untyped = service.unmarshal_with_codec(codec.as_ref(), &bytes).unwrap();
        assert_eq!(untyped, json!({"data": [1, 2, 3]}));
    }

    #[test]
    fn test_codec_for_responding_accept_any_case() {
        let service = service();

        for codec in service.registry().codecs() {
            let accept = format!("text/html,{}", codec.content_type().to_uppercase());
            let found = service.codec_for_responding(&accept, "", false);
            assert_eq!(found.content_type(), codec.content_type());
        }
    }

    #[test]
    fn test_typed_unmarshal_shape_mismatch() {
        let result: Result<Vec<u32>> = service().unmarshal(&JsonCodec, br#"{"a":1}"#);
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_unmarshal_with_jsonp_not_supported() {
        let result = service().unmarshal_with_codec(&JsonpCodec, b"{}");
        assert!(matches!(result, Err(CodecError::UnmarshalNotSupported)));
    }

    #[test]
    fn test_marshal_jsonp_through_service() {
        let service = service();
        let codec = service.codec_for_responding("", "", true);
        let options = MarshalOptions::new()
            .with_callback("cb")
            .with_client_context("ctx");

        let bytes = service
            .marshal_with_codec(codec.as_ref(), Subject::Plain(json!({"Name": "Mat"})), &options)
            .unwrap();
        assert_eq!(bytes, br#"cb({"Name":"Mat"},"ctx");"#);
    }
}
