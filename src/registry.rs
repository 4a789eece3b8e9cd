//! Codec registry - the ordered list of installed codecs.
//!
//! Insertion order is significant: resolution walks the registry front to
//! back and the first match wins, so earlier codecs shadow later ones that
//! claim the same content type or extension. The first codec is the default
//! used when nothing else matches.
//!
//! # Example
//!
//! ```
//! use web_codecs::codec::{JsonCodec, JsonpCodec};
//! use web_codecs::registry::CodecRegistry;
//!
//! let registry = CodecRegistry::builder()
//!     .codec(JsonCodec)
//!     .codec(JsonpCodec)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.default_codec().content_type(), "application/json");
//! assert!(registry.get("TEXT/JAVASCRIPT").is_some());
//! assert!(registry.get("text/xml").is_none());
//! ```

use std::sync::Arc;

use crate::codec::{Codec, JsonCodec, JsonpCodec, MsgPackCodec};
use crate::error::{CodecError, Result};

/// The codecs installed by default, JSON first.
pub fn installed_codecs() -> Vec<Arc<dyn Codec>> {
    vec![
        Arc::new(JsonCodec),
        Arc::new(JsonpCodec),
        Arc::new(MsgPackCodec),
    ]
}

/// Builder for a [`CodecRegistry`].
#[derive(Default)]
pub struct CodecRegistryBuilder {
    codecs: Vec<Arc<dyn Codec>>,
}

impl CodecRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a codec. The first codec appended becomes the default.
    pub fn codec<C: Codec + 'static>(self, codec: C) -> Self {
        self.shared(Arc::new(codec))
    }

    /// Append an already shared codec.
    pub fn shared(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codecs.push(codec);
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyRegistry`] if no codec was added.
    pub fn build(self) -> Result<CodecRegistry> {
        CodecRegistry::new(self.codecs)
    }
}

/// Immutable, ordered set of codecs.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    codecs: Vec<Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// Create a registry from an ordered list of codecs.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyRegistry`] if `codecs` is empty.
    pub fn new(codecs: Vec<Arc<dyn Codec>>) -> Result<Self> {
        if codecs.is_empty() {
            return Err(CodecError::EmptyRegistry);
        }
        Ok(Self { codecs })
    }

    /// Start building a custom registry.
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::new()
    }

    /// All codecs, in priority order.
    pub fn codecs(&self) -> &[Arc<dyn Codec>] {
        &self.codecs
    }

    /// The first registered codec.
    pub fn default_codec(&self) -> &Arc<dyn Codec> {
        // Non-empty by construction.
        &self.codecs[0]
    }

    /// Find the first codec whose content type equals `content_type`, ignoring case.
    pub fn get(&self, content_type: &str) -> Option<&Arc<dyn Codec>> {
        self.codecs
            .iter()
            .find(|c| c.content_type().eq_ignore_ascii_case(content_type))
    }

    /// Number of codecs.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self {
            codecs: installed_codecs(),
        }
    }
}
