//! Content negotiation: picking a decoder from the declared content type.

use serde::Deserialize;
use std::fmt;
use std::io::Read;

use crate::decode::DecodedBody;
use crate::error::DecodeError;

/// Content type routed to the YAML decoder by default.
pub const YAML_CONTENT_TYPE: &str = "application/yaml";

/// A decoding strategy: reads one document and returns it as a JSON object.
pub type DecodeFn = fn(&mut dyn Read) -> Result<DecodedBody, DecodeError>;

/// Dispatch table from content type to [`DecodeFn`].
///
/// Keys match the header value exactly: `Application/YAML` and
/// `application/yaml; charset=utf-8` both fall back to JSON. Unknown types
/// fall back to JSON, so [`select`](Self::select) never fails.
#[derive(Clone)]
pub struct ContentNegotiator {
    decoders: Vec<(String, DecodeFn)>,
    fallback: DecodeFn,
}

impl ContentNegotiator {
    /// A negotiator with no entries: everything decodes as JSON.
    pub fn json_only() -> Self {
        Self {
            decoders: Vec::new(),
            fallback: decode_json,
        }
    }

    /// Route `content_type` to `decode`, replacing any previous entry.
    pub fn register(mut self, content_type: &str, decode: DecodeFn) -> Self {
        match self.decoders.iter_mut().find(|(ct, _)| ct == content_type) {
            Some(entry) => entry.1 = decode,
            None => self.decoders.push((content_type.to_owned(), decode)),
        }
        self
    }

    /// Pick the decoder for a declared content type.
    pub fn select(&self, content_type: &str) -> DecodeFn {
        self.decoders
            .iter()
            .find(|(ct, _)| ct == content_type)
            .map(|(_, decode)| *decode)
            .unwrap_or(self.fallback)
    }

    /// Content types with a dedicated decoder.
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.decoders.iter().map(|(ct, _)| ct.as_str())
    }
}

impl Default for ContentNegotiator {
    fn default() -> Self {
        Self::json_only().register(YAML_CONTENT_TYPE, decode_yaml)
    }
}

impl fmt::Debug for ContentNegotiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNegotiator")
            .field("content_types", &self.content_types().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Decode the first JSON object of the stream, keeping numeric literals as
/// written. Anything after it is left unread.
pub fn decode_json(reader: &mut dyn Read) -> Result<DecodedBody, DecodeError> {
    let mut values = serde_json::Deserializer::from_reader(reader).into_iter::<DecodedBody>();
    match values.next() {
        Some(body) => Ok(body?),
        None => Err(DecodeError::Empty),
    }
}

/// Decode the first document of a YAML stream into the JSON value model.
/// Later documents are ignored.
pub fn decode_yaml(reader: &mut dyn Read) -> Result<DecodedBody, DecodeError> {
    match serde_yaml::Deserializer::from_reader(reader).next() {
        Some(document) => Ok(DecodedBody::deserialize(document)?),
        None => Err(DecodeError::Empty),
    }
}
