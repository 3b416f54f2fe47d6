//! Body decoding for requests that carry a payload.

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, Request};
use std::io::Read;
use tollgate_core::BodyConfig;

use crate::error::{BodyError, DecodeError};
use crate::limit::{BoundedBodyReader, MAX_BODY_BYTES};
use crate::negotiate::ContentNegotiator;

/// A decoded request body: string keys to arbitrary JSON values.
///
/// Numbers keep the literal text they were sent with, so
/// `123456789012345678901234567890` survives without rounding.
pub type DecodedBody = serde_json::Map<String, serde_json::Value>;

/// Whether requests with this method have a body worth decoding.
pub fn carries_body(method: &Method) -> bool {
    *method == Method::PUT || *method == Method::POST
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Decodes request bodies into [`DecodedBody`].
///
/// Both read paths return `Ok(None)` for methods other than `PUT` and
/// `POST`, whatever the body holds.
#[derive(Debug, Clone)]
pub struct BodyDecoder {
    negotiator: ContentNegotiator,
    max_bytes: u64,
}

impl BodyDecoder {
    /// Create a decoder with a custom negotiator and byte budget.
    pub fn new(negotiator: ContentNegotiator, max_bytes: u64) -> Self {
        Self {
            negotiator,
            max_bytes,
        }
    }

    /// Create a decoder with the default negotiator and the configured bound.
    pub fn from_config(config: &BodyConfig) -> Self {
        Self::new(ContentNegotiator::default(), config.max_bytes)
    }

    /// Byte budget of [`read_body`](Self::read_body), sentinel included.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn negotiator(&self) -> &ContentNegotiator {
        &self.negotiator
    }

    /// Decode the body, consuming it.
    ///
    /// At most [`max_bytes`](Self::max_bytes) are read. If the reader hands
    /// out its last byte the body is over the bound and decoding fails, even
    /// when the prefix happened to parse.
    pub fn read_body<B: Read>(
        &self,
        req: &mut Request<B>,
    ) -> Result<Option<DecodedBody>, BodyError> {
        if !carries_body(req.method()) {
            return Ok(None);
        }

        let content_type = content_type(req.headers());
        tracing::debug!(content_type, "decoding request body");
        let decode = self.negotiator.select(content_type);

        let mut reader = BoundedBodyReader::with_limit(req.body_mut(), self.max_bytes);
        let decoded = decode(&mut reader);
        if reader.limit_reached() {
            return Err(DecodeError::TooLarge {
                max: self.max_bytes.saturating_sub(1),
            }
            .into());
        }

        Ok(Some(decoded?))
    }

    /// Decode the body and put the original bytes back on the request.
    ///
    /// The whole body is buffered first; unlike [`read_body`](Self::read_body)
    /// this path applies no size bound. Afterwards the request body is a fresh
    /// stream over the same bytes, whether or not decoding succeeded.
    pub fn read_body_preserving<B>(
        &self,
        req: &mut Request<B>,
    ) -> Result<Option<DecodedBody>, BodyError>
    where
        B: Read + From<Bytes>,
    {
        if !carries_body(req.method()) {
            return Ok(None);
        }

        let mut buf = Vec::new();
        req.body_mut().read_to_end(&mut buf)?;
        let bytes = Bytes::from(buf);
        *req.body_mut() = B::from(bytes.clone());

        self.decode_buffered(req.method(), req.headers(), &bytes)
    }

    /// Decode a body the caller has already buffered.
    ///
    /// Same method and content type rules as the read paths; no size bound is
    /// applied to `bytes`.
    pub fn decode_buffered(
        &self,
        method: &Method,
        headers: &HeaderMap,
        bytes: &[u8],
    ) -> Result<Option<DecodedBody>, BodyError> {
        if !carries_body(method) {
            return Ok(None);
        }

        let content_type = content_type(headers);
        tracing::debug!(content_type, len = bytes.len(), "decoding buffered request body");
        let decode = self.negotiator.select(content_type);

        let mut reader = bytes;
        Ok(Some(decode(&mut reader)?))
    }
}

impl Default for BodyDecoder {
    fn default() -> Self {
        Self::new(ContentNegotiator::default(), MAX_BODY_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::RequestBody;
    use serde_json::json;

    fn request(method: &str, content_type: &str, body: &'static str) -> Request<RequestBody> {
        Request::builder()
            .method(method)
            .uri("/v1/things")
            .header("Content-type", content_type)
            .body(RequestBody::from(body))
            .unwrap()
    }

    #[test]
    fn carries_body_only_for_put_and_post() {
        assert!(carries_body(&Method::PUT));
        assert!(carries_body(&Method::POST));
        for method in [
            Method::GET,
            Method::DELETE,
            Method::PATCH,
            Method::HEAD,
            Method::OPTIONS,
        ] {
            assert!(!carries_body(&method), "{method}");
        }
    }

    #[test]
    fn decodes_json_object() {
        let mut req = request("POST", "application/json", r#"{"a": 1, "b": [true, null]}"#);
        let body = BodyDecoder::default().read_body(&mut req).unwrap().unwrap();
        assert_eq!(serde_json::Value::Object(body), json!({"a": 1, "b": [true, null]}));
    }

    #[test]
    fn missing_content_type_decodes_as_json() {
        let mut req = Request::builder()
            .method("PUT")
            .body(RequestBody::from(r#"{"a": "b"}"#))
            .unwrap();
        let body = BodyDecoder::default().read_body(&mut req).unwrap().unwrap();
        assert_eq!(body["a"], json!("b"));
    }

    #[test]
    fn consuming_decode_drains_body() {
        let mut req = request("POST", "application/json", r#"{"a": 1}"#);
        BodyDecoder::default().read_body(&mut req).unwrap();
        assert_eq!(req.body().remaining(), 0);
    }

    #[test]
    fn non_object_body_is_invalid() {
        let mut req = request("POST", "application/json", "[1, 2, 3]");
        let err = BodyDecoder::default().read_body(&mut req).unwrap_err();
        assert!(matches!(err, BodyError::InvalidBodyContent { .. }));
    }

    #[test]
    fn empty_body_is_invalid() {
        let mut req = request("POST", "application/json", "");
        let err = BodyDecoder::default().read_body(&mut req).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse body: "));
    }

    #[test]
    fn custom_bound_is_applied() {
        let decoder = BodyDecoder::new(ContentNegotiator::default(), 8);
        let mut req = request("POST", "application/json", r#"{"a": "long enough"}"#);
        let err = decoder.read_body(&mut req).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse body: request body is larger than 7 bytes"
        );
    }

    #[test]
    fn from_config_uses_configured_bound() {
        let decoder = BodyDecoder::from_config(&BodyConfig { max_bytes: 64 });
        assert_eq!(decoder.max_bytes(), 64);
        assert_eq!(BodyDecoder::default().max_bytes(), MAX_BODY_BYTES);
    }

    #[test]
    fn decode_buffered_follows_method_and_content_type() {
        let decoder = BodyDecoder::default();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "application/yaml".parse().unwrap());

        let body = decoder
            .decode_buffered(&Method::PUT, &headers, b"a: 1\n")
            .unwrap()
            .unwrap();
        assert_eq!(body["a"], json!(1));
        assert!(
            decoder
                .decode_buffered(&Method::GET, &headers, b"{")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn preserving_decode_restores_body_on_failure() {
        let mut req = request("POST", "application/json", "{not json");
        let err = BodyDecoder::default()
            .read_body_preserving(&mut req)
            .unwrap_err();

        assert!(matches!(err, BodyError::InvalidBodyContent { .. }));
        assert_eq!(&req.into_body().into_bytes()[..], b"{not json");
    }
}
