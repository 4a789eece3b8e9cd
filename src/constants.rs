//! Canonical content types, file extensions and option keys.
//!
//! Content types and extensions are stored lowercase; resolution lowercases
//! request input before comparing against them.

/// Content type served by [`JsonCodec`](crate::codec::JsonCodec).
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type served by [`JsonpCodec`](crate::codec::JsonpCodec).
pub const CONTENT_TYPE_JAVASCRIPT: &str = "text/javascript";

/// Content type served by [`MsgPackCodec`](crate::codec::MsgPackCodec).
pub const CONTENT_TYPE_MSGPACK: &str = "application/x-msgpack";

/// File extension for JSON responses.
pub const FILE_EXTENSION_JSON: &str = "json";

/// File extension for JSONP responses.
pub const FILE_EXTENSION_JAVASCRIPT: &str = "js";

/// File extension for MsgPack responses.
pub const FILE_EXTENSION_MSGPACK: &str = "msgpack";

/// Option key holding the JSONP callback function name (string, required).
pub const OPTION_KEY_CALLBACK: &str = "callback";

/// Option key holding the JSONP client context (string, optional).
pub const OPTION_KEY_CLIENT_CONTEXT: &str = "clientContext";
