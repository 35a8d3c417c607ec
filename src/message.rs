//! Header and body accumulation shared by requests and responses.
use bytes::{Bytes, BytesMut};

use crate::headers::{HeaderMap, HeaderName, HeaderValue};
use crate::span::Span;

mod limit;
mod error;
mod write;


pub use limit::Limit;
pub use error::{LimitKind, MessageError};
pub use write::write_message;

/// HTTP message headers and body.
///
/// Every insertion is checked against the message [`Limit`].
#[derive(Clone, Debug, Default)]
pub struct Message {
    headers: HeaderMap,
    body: BytesMut,
    limit: Limit,
    header_size: usize,
    chunked: bool,
}

impl Message {
    /// Create new empty [`Message`] bounded by `limit`.
    #[inline]
    pub fn new(limit: Limit) -> Self {
        Self {
            headers: HeaderMap::new(),
            body: BytesMut::new(),
            limit,
            header_size: 0,
            chunked: false,
        }
    }

    /// Returns the message [`Limit`].
    #[inline]
    pub const fn limit(&self) -> &Limit {
        &self.limit
    }

    /// Returns shared reference to [`HeaderMap`].
    #[inline]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns mutable reference to [`HeaderMap`].
    ///
    /// Headers inserted through this reference are not counted against the [`Limit`].
    #[inline]
    pub const fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the accumulated body.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns `true` if the body was received with chunked framing.
    #[inline]
    pub const fn is_chunked(&self) -> bool {
        self.chunked
    }

    /// Set whether the body is framed as chunked when written.
    #[inline]
    pub const fn set_chunked(&mut self, chunked: bool) {
        self.chunked = chunked;
    }
}

// ===== Builder =====

impl Message {
    /// Add a header from spans into the input buffer.
    ///
    /// Both name and value share the input buffer instead of being copied, unless the name needs
    /// case normalization.
    ///
    /// # Errors
    ///
    /// Returns error if the header is invalid or if the [`Limit`] would be exceeded.
    pub fn add_header(&mut self, name: Span<'_>, value: Span<'_>) -> Result<(), MessageError> {
        self.check_header(name.len(), value.len())?;
        let name = HeaderName::from_bytes(name.to_bytes())?;
        let value = HeaderValue::from_bytes(value.to_bytes())?;
        self.push_header(name, value);
        Ok(())
    }

    /// Append an already built header.
    ///
    /// # Errors
    ///
    /// Returns error if the [`Limit`] would be exceeded.
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) -> Result<(), MessageError> {
        self.check_header(name.len(), value.len())?;
        self.push_header(name, value);
        Ok(())
    }

    /// Append a chunk of body.
    ///
    /// # Errors
    ///
    /// Returns error if the body would exceed the [`Limit`], the body is left unchanged.
    pub fn add_chunk(&mut self, chunk: Span<'_>) -> Result<(), MessageError> {
        self.extend_body(chunk.as_slice())
    }

    /// Append a chunk of body from bytes that are not part of an input buffer.
    ///
    /// # Errors
    ///
    /// Returns error if the body would exceed the [`Limit`], the body is left unchanged.
    pub fn extend_body(&mut self, chunk: &[u8]) -> Result<(), MessageError> {
        self.reserve_body(chunk.len())?;
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    /// Check that `additional` more body bytes fit in the [`Limit`], and reserve them.
    ///
    /// # Errors
    ///
    /// Returns error if the body would exceed the [`Limit`].
    pub fn reserve_body(&mut self, additional: usize) -> Result<(), MessageError> {
        match self.body.len().checked_add(additional) {
            Some(len) if len <= self.limit.max_body_size() => {
                self.body.reserve(additional);
                Ok(())
            }
            _ => Err(MessageError::LimitExceeded(LimitKind::Body)),
        }
    }

    /// Clear headers and body, keeping the allocated capacity.
    pub fn reset(&mut self) {
        self.headers.clear();
        self.body.clear();
        self.header_size = 0;
        self.chunked = false;
    }

    /// Consume the message, returning the body as [`Bytes`].
    #[inline]
    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }

    /// Write the message in wire format to `bufm`.
    #[inline]
    pub fn write_to(&self, bufm: &mut BytesMut) {
        write_message(self, bufm);
    }

    fn check_header(&self, name_len: usize, value_len: usize) -> Result<(), MessageError> {
        if self.headers.len() >= self.limit.max_headers() {
            return Err(MessageError::LimitExceeded(LimitKind::HeaderCount));
        }
        match self.header_size.checked_add(name_len + value_len) {
            Some(size) if size <= self.limit.max_header_size() => Ok(()),
            _ => Err(MessageError::LimitExceeded(LimitKind::HeaderSize)),
        }
    }

    fn push_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.header_size += name.len() + value.len();
        self.headers.append(name, value);
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bufm = BytesMut::new();
        self.write_to(&mut bufm);
        f.write_str(&String::from_utf8_lossy(&bufm))
    }
}
