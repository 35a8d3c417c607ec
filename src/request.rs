//! HTTP Request.
use bytes::{Bytes, BytesMut};

use crate::bytestr::ByteStr;
use crate::headers::{AsHeaderName, HeaderMap, HeaderValue};
use crate::http::{Method, Version};
use crate::message::{Limit, Message};

mod field;
mod error;
mod assemble;
mod write;

#[cfg(test)]
mod test;

pub use field::{FieldName, PendingField};
pub use error::{Malformed, ParseError};
pub use assemble::Assembler;
pub use write::write_request;

/// HTTP Request.
///
/// A request is built from one complete HTTP/1.x request held in a [`Bytes`] buffer. The request
/// target and header values share that buffer instead of copying it, the body is copied so that
/// chunked framing can be removed.
///
/// # Example
///
/// ```
/// use h1_assemble::{http::Method, message::Limit, request::Request};
///
/// let req = Request::parse(&b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n"[..], Limit::default())?;
///
/// assert_eq!(req.method(), Method::GET);
/// assert_eq!(req.uri(), "/index.html");
/// assert_eq!(req.header("host").unwrap(), "example.com");
/// # Ok::<_, h1_assemble::request::ParseError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Request {
    method: Method,
    uri: ByteStr,
    version: Version,
    message: Message,
}

impl Default for Request {
    #[inline]
    fn default() -> Self {
        Self::new(Limit::default())
    }
}

/// Constructor
impl Request {
    /// Create new empty [`Request`] bounded by `limit`.
    ///
    /// An empty request is `GET / HTTP/1.1` without headers and body.
    #[inline]
    pub fn new(limit: Limit) -> Self {
        Self {
            method: Method::GET,
            uri: ByteStr::from_static("/"),
            version: Version::HTTP_11,
            message: Message::new(limit),
        }
    }

    /// Parse one complete request from `buf`.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not exactly one valid request, or if it crosses `limit`.
    pub fn parse(buf: impl Into<Bytes>, limit: Limit) -> Result<Self, ParseError> {
        let mut req = Self::new(limit);
        req.parse_from(buf)?;
        Ok(req)
    }

    /// Reset this request and parse `buf` into it, keeping the [`Limit`] and allocated capacity.
    ///
    /// On error, the request is left reset.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not exactly one valid request, or if it crosses the
    /// [`Limit`].
    pub fn parse_from(&mut self, buf: impl Into<Bytes>) -> Result<(), ParseError> {
        self.reset();
        let buf = buf.into();
        let result = assemble::assemble(self, &buf);
        if result.is_err() {
            self.reset();
        }
        result
    }
}

impl Request {
    /// Returns the request method.
    #[inline]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the request target.
    #[inline]
    pub const fn uri(&self) -> &ByteStr {
        &self.uri
    }

    /// Returns the protocol version.
    #[inline]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns shared reference to [`HeaderMap`].
    #[inline]
    pub const fn headers(&self) -> &HeaderMap {
        self.message.headers()
    }

    /// Returns the first value of header `name`, compared case-insensitively.
    #[inline]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        self.message.headers().get(name)
    }

    /// Returns the request body with any chunked framing removed.
    #[inline]
    pub fn body(&self) -> &[u8] {
        self.message.body()
    }

    /// Returns the [`Limit`] this request is parsed with.
    #[inline]
    pub const fn limit(&self) -> &Limit {
        self.message.limit()
    }

    /// Returns shared reference to the underlying [`Message`].
    #[inline]
    pub const fn message(&self) -> &Message {
        &self.message
    }

    /// Returns mutable reference to the underlying [`Message`].
    #[inline]
    pub const fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    /// Set the request method.
    #[inline]
    pub const fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// Set the request target.
    #[inline]
    pub fn set_uri(&mut self, uri: impl Into<ByteStr>) -> &mut Self {
        self.uri = uri.into();
        self
    }

    /// Set the protocol version.
    #[inline]
    pub const fn set_version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    /// Return to the empty state, keeping the [`Limit`] and allocated capacity.
    pub fn reset(&mut self) {
        self.method = Method::GET;
        self.uri = ByteStr::from_static("/");
        self.version = Version::HTTP_11;
        self.message.reset();
    }

    /// Consume the request, returning the underlying [`Message`].
    #[inline]
    pub fn into_message(self) -> Message {
        self.message
    }

    /// Write the request in wire format to `bufm`.
    #[inline]
    pub fn write_to(&self, bufm: &mut BytesMut) {
        write_request(self, bufm);
    }

    /// Render the request in wire format.
    pub fn to_bytes(&self) -> Bytes {
        let mut bufm = BytesMut::new();
        self.write_to(&mut bufm);
        bufm.freeze()
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}
