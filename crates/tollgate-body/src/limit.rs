//! Size-bounded body reading.

use std::io::{self, Read, Take};

pub use tollgate_core::DEFAULT_MAX_BODY_BYTES as MAX_BODY_BYTES;

/// A reader that yields at most `limit` bytes of the wrapped stream.
///
/// Past the limit reads return `Ok(0)`, as if the stream had ended. The
/// reader never fails on its own; callers check [`limit_reached`] after
/// decoding to tell a complete body from a truncated one.
///
/// [`limit_reached`]: BoundedBodyReader::limit_reached
#[derive(Debug)]
pub struct BoundedBodyReader<R> {
    inner: Take<R>,
}

impl<R: Read> BoundedBodyReader<R> {
    /// Wrap `inner` with the default [`MAX_BODY_BYTES`] budget.
    pub fn new(inner: R) -> Self {
        Self::with_limit(inner, MAX_BODY_BYTES)
    }

    /// Wrap `inner` with a custom byte budget.
    pub fn with_limit(inner: R, limit: u64) -> Self {
        Self {
            inner: inner.take(limit),
        }
    }

    /// Bytes that may still be read.
    pub fn remaining(&self) -> u64 {
        self.inner.limit()
    }

    /// True once the whole budget, sentinel byte included, has been read.
    pub fn limit_reached(&self) -> bool {
        self.inner.limit() == 0
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R: Read> Read for BoundedBodyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}
