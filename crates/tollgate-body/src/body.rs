//! In-memory, re-readable request body.

use bytes::buf::Reader;
use bytes::{Buf, Bytes};
use std::io::{self, Read};

/// A request body held in memory.
///
/// It reads like any other stream, and [`into_bytes`](Self::into_bytes)
/// returns whatever has not been read yet. The non-destructive decode puts a
/// fresh `RequestBody` back on the request so later readers see every byte.
#[derive(Debug)]
pub struct RequestBody {
    reader: Reader<Bytes>,
}

impl RequestBody {
    pub fn empty() -> Self {
        Self::from(Bytes::new())
    }

    /// Bytes not consumed by reads so far.
    pub fn remaining(&self) -> usize {
        self.reader.get_ref().len()
    }

    /// Hand the unread bytes back, e.g. to rebuild an HTTP body.
    pub fn into_bytes(self) -> Bytes {
        self.reader.into_inner()
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl Read for RequestBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        Self {
            reader: bytes.reader(),
        }
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<String> for RequestBody {
    fn from(body: String) -> Self {
        Self::from(Bytes::from(body))
    }
}

impl From<&'static str> for RequestBody {
    fn from(body: &'static str) -> Self {
        Self::from(Bytes::from_static(body.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_then_returns_rest() {
        let mut body = RequestBody::from("hello world");
        let mut head = [0u8; 6];
        body.read_exact(&mut head).unwrap();

        assert_eq!(&head, b"hello ");
        assert_eq!(body.remaining(), 5);
        assert_eq!(&body.into_bytes()[..], b"world");
    }

    #[test]
    fn empty_body_reads_nothing() {
        let mut body = RequestBody::default();
        let mut out = Vec::new();
        assert_eq!(body.read_to_end(&mut out).unwrap(), 0);
        assert!(body.into_bytes().is_empty());
    }
}
