use bytes::Bytes;

use super::{field::FieldName, PendingField, ParseError, Request};
use crate::bytestr::ByteStr;
use crate::headers::{HeaderName, HeaderValue};
use crate::http::Method;
use crate::log::{debug, trace, warning};
use crate::message::LimitKind;
use crate::request::Malformed;
use crate::scanner::{Framing, Handler, Head, Scanner};
use crate::span::Span;

/// Progress through a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    MethodKnown,
    UriKnown,
    /// receiving header field name
    Field,
    /// header value received
    Value,
    HeadersDone,
    Body,
    TrailerField,
    TrailerValue,
    Done,
}

/// [`Handler`] that builds a [`Request`] from scanner events.
///
/// Events are checked against the request grammar, an event that arrives out of order fails with
/// [`ParseError::OrderingViolation`] instead of being applied.
#[derive(Debug)]
pub struct Assembler<'a, 'r> {
    req: &'r mut Request,
    field: PendingField<'a>,
    state: State,
}

impl<'a, 'r> Assembler<'a, 'r> {
    /// Create new [`Assembler`] writing into `req`.
    ///
    /// The request is expected to be freshly [`reset`][Request::reset].
    #[inline]
    pub fn new(req: &'r mut Request) -> Self {
        Self { req, field: PendingField::None, state: State::Start }
    }

    /// Returns the pending header field name.
    #[inline]
    pub fn field(&mut self) -> &mut PendingField<'a> {
        &mut self.field
    }

    /// Returns `true` once the whole request was received.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == State::Done
    }

    fn add_header(&mut self, name: FieldName<'a>, value: Span<'a>) -> Result<(), ParseError> {
        let message = self.req.message_mut();
        match name {
            FieldName::Span(name) => message.add_header(name, value)?,
            owned => {
                let name = HeaderName::from_bytes(owned.into_bytes()).map_err(Malformed::InvalidHeader)?;
                let value = HeaderValue::from_bytes(value.to_bytes()).map_err(Malformed::InvalidHeader)?;
                message.append_header(name, value)?;
            }
        }
        Ok(())
    }
}

impl<'a> Handler<'a> for Assembler<'a, '_> {
    type Error = ParseError;

    fn on_message_begin(&mut self, method: Span<'a>) -> Result<(), ParseError> {
        if self.state != State::Start {
            return Err(violation("method after request start"));
        }
        let decoded = Method::from_token(method.as_slice());
        if decoded.is_unknown() {
            debug!("unknown method token: {:?}", String::from_utf8_lossy(method.as_slice()));
        }
        self.req.set_method(decoded);
        self.state = State::MethodKnown;
        Ok(())
    }

    fn on_url(&mut self, target: Span<'a>) -> Result<(), ParseError> {
        if self.state != State::MethodKnown {
            return Err(violation("request target before method"));
        }
        let uri = ByteStr::from_bytes(target.to_bytes()).map_err(|_| Malformed::InvalidUri)?;
        self.req.set_uri(uri);
        self.state = State::UriKnown;
        Ok(())
    }

    fn on_header_field(&mut self, name: Span<'a>) -> Result<(), ParseError> {
        self.state = match self.state {
            State::UriKnown | State::Field | State::Value => State::Field,
            State::HeadersDone | State::Body | State::TrailerField | State::TrailerValue => {
                State::TrailerField
            }
            _ => return Err(violation("header field before request target")),
        };
        self.field().push(name);
        Ok(())
    }

    fn on_header_value(&mut self, value: Span<'a>) -> Result<(), ParseError> {
        let Some(name) = self.field().take() else {
            return Err(violation("header value without field name"));
        };
        self.state = match self.state {
            State::Field => State::Value,
            State::TrailerField => State::TrailerValue,
            _ => return Err(violation("header value out of place")),
        };
        if self.state == State::TrailerValue && is_head_only(name.as_slice()) {
            debug!("dropped trailer: {:?}", String::from_utf8_lossy(name.as_slice()));
            return Ok(());
        }
        self.add_header(name, value)
    }

    fn on_headers_complete(&mut self, head: &Head) -> Result<(), ParseError> {
        if self.field.is_pending() {
            return Err(violation("header field without value"));
        }
        if !matches!(self.state, State::UriKnown | State::Value) {
            return Err(violation("header block end out of place"));
        }

        self.req.set_version(head.version());
        let message = self.req.message_mut();
        match head.framing() {
            Framing::Empty => {}
            Framing::Length(len) => {
                let len = usize::try_from(len).map_err(|_| ParseError::LimitExceeded(LimitKind::Body))?;
                message.reserve_body(len)?;
            }
            Framing::Chunked => message.set_chunked(true),
        }

        self.state = State::HeadersDone;
        Ok(())
    }

    fn on_body(&mut self, chunk: Span<'a>) -> Result<(), ParseError> {
        if !matches!(self.state, State::HeadersDone | State::Body) {
            return Err(violation("body before header block end"));
        }
        self.req.message_mut().add_chunk(chunk)?;
        self.state = State::Body;
        Ok(())
    }

    fn on_message_complete(&mut self) -> Result<(), ParseError> {
        if self.field.is_pending() {
            return Err(violation("trailer field without value"));
        }
        if !matches!(self.state, State::HeadersDone | State::Body | State::TrailerValue) {
            return Err(violation("request end before header block end"));
        }
        self.state = State::Done;
        Ok(())
    }
}

/// Scan `buf` into a freshly reset `req`.
pub(crate) fn assemble(req: &mut Request, buf: &Bytes) -> Result<(), ParseError> {
    let scanner = Scanner::new().with_max_headers(req.limit().max_headers());
    let mut assembler = Assembler::new(req);

    let read = scanner.execute(buf, &mut assembler)?;
    trace!("request of {read} bytes, {} bytes of input", buf.len());

    if !assembler.is_complete() {
        return Err(violation("scan ended before request end"));
    }
    if read != buf.len() {
        return Err(ParseError::TrailingBytes);
    }

    debug!(
        "{} {} {}, {} headers, {} bytes body",
        req.method(),
        req.uri(),
        req.version(),
        req.headers().len(),
        req.body().len(),
    );
    Ok(())
}

/// Fields that control framing or routing, a trailer must not override them (RFC 9110 §6.5.1).
fn is_head_only(name: &[u8]) -> bool {
    const HEAD_ONLY: [&[u8]; 3] = [b"content-length", b"transfer-encoding", b"host"];
    HEAD_ONLY.iter().any(|field| field.eq_ignore_ascii_case(name))
}

fn violation(event: &'static str) -> ParseError {
    warning!("rejected event: {event}");
    ParseError::OrderingViolation(event)
}
