//! Event-emitting HTTP/1.x request scanner.
//!
//! [`Scanner`] locates the request line, header fields, body chunks and trailers in a complete
//! input buffer and reports each of them as a [`Span`] to a [`Handler`], in wire order.
use bytes::Bytes;
use httparse::{EMPTY_HEADER, Status};

use crate::http::Version;
use crate::log::trace;
use crate::span::Span;

mod error;
mod framing;


pub use error::{Fault, ScanError};
pub use framing::Framing;

/// Default maximum number of header fields accepted by a [`Scanner`].
pub const MAX_HEADERS: usize = 64;

/// Receives scanner events.
///
/// Events are delivered in the order:
///
/// ```text
/// message_begin url (header_field+ header_value)* headers_complete body* (header_field+ header_value)* message_complete
/// ```
///
/// where the header events after the body are chunked trailers. A handler must treat any other
/// order as an error.
///
/// Returning an error from any callback aborts the scan with [`ScanError::Handler`].
pub trait Handler<'a> {
    /// Error returned by the callbacks.
    type Error;

    /// Request method token.
    fn on_message_begin(&mut self, method: Span<'a>) -> Result<(), Self::Error>;

    /// Request target.
    fn on_url(&mut self, target: Span<'a>) -> Result<(), Self::Error>;

    /// Header field name, or a piece of it.
    ///
    /// Consecutive calls before [`Handler::on_header_value`] deliver one name in pieces.
    fn on_header_field(&mut self, name: Span<'a>) -> Result<(), Self::Error>;

    /// Header field value, completing the pending field name.
    fn on_header_value(&mut self, value: Span<'a>) -> Result<(), Self::Error>;

    /// End of the header block.
    fn on_headers_complete(&mut self, head: &Head) -> Result<(), Self::Error>;

    /// A piece of the body, already stripped of chunk framing.
    fn on_body(&mut self, chunk: Span<'a>) -> Result<(), Self::Error>;

    /// End of the message.
    fn on_message_complete(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Request line and framing information, reported once the header block is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Head {
    version: Version,
    framing: Framing,
}

impl Head {
    /// Create new [`Head`].
    #[inline]
    pub const fn new(version: Version, framing: Framing) -> Self {
        Self { version, framing }
    }

    /// Returns the request protocol version.
    #[inline]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the body [`Framing`].
    #[inline]
    pub const fn framing(&self) -> Framing {
        self.framing
    }
}

/// HTTP/1.x request scanner.
///
/// The scanner holds no per-message state, a single instance can scan any number of buffers.
#[derive(Clone, Debug)]
pub struct Scanner {
    max_headers: usize,
}

impl Default for Scanner {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Create new [`Scanner`] accepting up to [`MAX_HEADERS`] header fields.
    #[inline]
    pub const fn new() -> Self {
        Self { max_headers: MAX_HEADERS }
    }

    /// Set the maximum number of header fields, and trailer fields, accepted.
    #[inline]
    pub const fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    /// Returns the maximum number of header fields accepted.
    #[inline]
    pub const fn max_headers(&self) -> usize {
        self.max_headers
    }

    /// Scan one complete request from the start of `buf`, reporting events to `handler`.
    ///
    /// Returns the number of bytes the request occupies. Bytes after it are not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Fault`] if the request is malformed or `buf` ends before the request
    /// is complete, and [`ScanError::Handler`] if a callback fails.
    pub fn execute<'a, H>(&self, buf: &'a Bytes, handler: &mut H) -> Result<usize, ScanError<H::Error>>
    where
        H: Handler<'a>,
    {
        let input: &'a [u8] = buf;
        let mut headers = vec![EMPTY_HEADER; self.max_headers];
        let mut req = httparse::Request::new(&mut headers);

        let head_len = match req.parse(input)? {
            Status::Complete(len) => len,
            Status::Partial => return Err(Fault::Incomplete.into()),
        };

        let (Some(method), Some(target), Some(minor)) = (req.method, req.path, req.version) else {
            return Err(Fault::Incomplete.into());
        };

        let framing = Framing::from_headers(&*req.headers)?;
        trace!("scanned head of {head_len} bytes, framing: {framing:?}");

        handler.on_message_begin(span(buf, method.as_bytes())?).map_err(ScanError::Handler)?;
        handler.on_url(span(buf, target.as_bytes())?).map_err(ScanError::Handler)?;
        emit_fields(buf, &*req.headers, handler)?;
        handler
            .on_headers_complete(&Head::new(Version::new(1, minor), framing))
            .map_err(ScanError::Handler)?;

        let end = match framing {
            Framing::Empty => head_len,
            Framing::Length(len) => {
                let len = usize::try_from(len).map_err(|_| Fault::InvalidContentLength)?;
                let chunk = Span::new(buf, head_len, len).ok_or(Fault::Incomplete)?;
                if !chunk.is_empty() {
                    handler.on_body(chunk).map_err(ScanError::Handler)?;
                }
                head_len + len
            }
            Framing::Chunked => self.scan_chunked(buf, head_len, handler)?,
        };

        handler.on_message_complete().map_err(ScanError::Handler)?;
        Ok(end)
    }

    /// Scan chunked body and trailers starting at `pos`, returning the end of the message.
    fn scan_chunked<'a, H>(
        &self,
        buf: &'a Bytes,
        mut pos: usize,
        handler: &mut H,
    ) -> Result<usize, ScanError<H::Error>>
    where
        H: Handler<'a>,
    {
        let input: &'a [u8] = buf;

        loop {
            let (read, size) = match httparse::parse_chunk_size(&input[pos..]) {
                Ok(Status::Complete(ok)) => ok,
                Ok(Status::Partial) => return Err(Fault::Incomplete.into()),
                Err(httparse::InvalidChunkSize) => return Err(Fault::InvalidChunk.into()),
            };
            pos += read;

            if size == 0 {
                break;
            }

            let size = usize::try_from(size).map_err(|_| Fault::InvalidChunk)?;
            let chunk = Span::new(buf, pos, size).ok_or(Fault::Incomplete)?;
            trace!("chunk of {size} bytes");
            handler.on_body(chunk).map_err(ScanError::Handler)?;
            pos += size;

            match input.get(pos..pos + 2) {
                Some(b"\r\n") => pos += 2,
                Some(_) => return Err(Fault::InvalidChunk.into()),
                None => return Err(Fault::Incomplete.into()),
            }
        }

        let mut trailers = vec![EMPTY_HEADER; self.max_headers];
        match httparse::parse_headers(&input[pos..], &mut trailers)? {
            Status::Complete((read, trailers)) => {
                emit_fields(buf, trailers, handler)?;
                Ok(pos + read)
            }
            Status::Partial => Err(Fault::Incomplete.into()),
        }
    }
}

fn emit_fields<'a, H>(
    buf: &'a Bytes,
    fields: &[httparse::Header<'a>],
    handler: &mut H,
) -> Result<(), ScanError<H::Error>>
where
    H: Handler<'a>,
{
    for field in fields {
        handler.on_header_field(span(buf, field.name.as_bytes())?).map_err(ScanError::Handler)?;
        handler.on_header_value(span(buf, field.value)?).map_err(ScanError::Handler)?;
    }
    Ok(())
}

fn span<'a>(buf: &'a Bytes, sub: &[u8]) -> Result<Span<'a>, Fault> {
    Span::from_subslice(buf, sub).ok_or(Fault::OutOfBounds)
}
