//! Negotiate - resolve response codecs for a few typical requests.
//!
//! This example demonstrates:
//! - Resolving a codec from an Accept header, an extension or a callback flag
//! - Marshalling a value through a public-data facade
//! - Passing JSONP options
//!
//! ```text
//! cargo run --example negotiate
//! ```

use serde_json::{json, Value};
use web_codecs::codec::MarshalOptions;
use web_codecs::error::Result;
use web_codecs::facade::{PublicData, Subject};
use web_codecs::service::{CodecService, WebCodecService};

/// A record with a field that must never leave the server.
struct Account {
    name: String,
    api_key: String,
}

impl PublicData for Account {
    fn public_data(&self, _options: &MarshalOptions) -> Result<Value> {
        Ok(json!({ "name": self.name, "hasKey": !self.api_key.is_empty() }))
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let service = WebCodecService::new();
    let account = Account {
        name: "Mat".to_string(),
        api_key: "k-123".to_string(),
    };

    // (accept, extension, callback)
    let requests = [
        ("application/json", "", None),
        ("", "js", Some("handle")),
        ("", "", Some("cb")),
        ("text/html", "", None),
        ("application/x-msgpack", "", None),
    ];

    for (accept, extension, callback) in requests {
        let codec = service.codec_for_responding(accept, extension, callback.is_some());

        let mut options = MarshalOptions::new();
        if let Some(cb) = callback {
            options = options.with_callback(cb).with_client_context("demo");
        }

        let body = service.marshal_with_codec(codec.as_ref(), Subject::facade(&account), &options)?;
        println!(
            "accept={accept:?} ext={extension:?} callback={callback:?} -> {} {:?}",
            codec.content_type(),
            String::from_utf8_lossy(&body)
        );
    }

    Ok(())
}
