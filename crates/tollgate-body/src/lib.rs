//! # tollgate-body
//!
//! Request body decoding for the Tollgate gateway layer.
//!
//! Bodies of `PUT` and `POST` requests are normalized into a [`DecodedBody`],
//! a JSON object map whose numbers keep their literal text. The decoding
//! strategy is picked from the `Content-type` header by a
//! [`ContentNegotiator`]:
//!
//! | Content type | Decoder |
//! |--------------|---------|
//! | `application/yaml` | YAML, converted to the JSON value model |
//! | anything else | JSON |
//!
//! [`BodyDecoder`] offers two read paths:
//!
//! - [`BodyDecoder::read_body`] consumes the body through a
//!   [`BoundedBodyReader`] capped at [`MAX_BODY_BYTES`].
//! - [`BodyDecoder::read_body_preserving`] buffers the whole body, puts a
//!   fresh copy back on the request and decodes the buffer. This path has no
//!   size cap.
//!
//! ## Example Usage
//!
//! ```rust
//! use http::Request;
//! use tollgate_body::{BodyDecoder, RequestBody};
//!
//! let mut req = Request::builder()
//!     .method("POST")
//!     .header("Content-type", "application/yaml")
//!     .body(RequestBody::from("name: widget\ncount: 3\n"))
//!     .unwrap();
//!
//! let decoder = BodyDecoder::default();
//! let body = decoder.read_body_preserving(&mut req).unwrap().unwrap();
//! assert_eq!(body["name"], "widget");
//!
//! // The request still carries the original bytes.
//! let raw = req.into_body().into_bytes();
//! assert_eq!(&raw[..], b"name: widget\ncount: 3\n");
//! ```

pub mod body;
pub mod decode;
pub mod error;
pub mod limit;
pub mod negotiate;

pub use body::RequestBody;
pub use decode::{BodyDecoder, DecodedBody, carries_body};
pub use error::{BodyError, DecodeError};
pub use limit::{BoundedBodyReader, MAX_BODY_BYTES};
pub use negotiate::{ContentNegotiator, DecodeFn, YAML_CONTENT_TYPE, decode_json, decode_yaml};
