use crate::headers::HeaderError;
use crate::message::{LimitKind, MessageError};
use crate::scanner::{Fault, ScanError};

/// An error that can occur when parsing a [`Request`][super::Request].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input is not a valid HTTP/1.x request.
    #[error("malformed request: {0}")]
    Malformed(#[from] Malformed),
    /// Scanner events arrived in an order that does not describe a request.
    #[error("unexpected event: {0}")]
    OrderingViolation(&'static str),
    /// A [`Limit`][crate::message::Limit] bound was crossed.
    #[error("{0} limit exceeded")]
    LimitExceeded(LimitKind),
    /// Input continues after the end of the request.
    #[error("trailing bytes after request")]
    TrailingBytes,
}

impl ParseError {
    /// Returns `true` if the error is caused by the input content rather than a [`Limit`].
    ///
    /// [`Limit`]: crate::message::Limit
    #[inline]
    pub const fn is_malformed(&self) -> bool {
        !matches!(self, Self::LimitExceeded(_))
    }
}

/// Malformed request details.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    /// The scanner rejected the request syntax or framing.
    #[error(transparent)]
    Scan(#[from] Fault),
    /// The request target is not valid UTF-8.
    #[error("request target is not valid UTF-8")]
    InvalidUri,
    /// A header name is empty, or a header name or value contains a forbidden byte.
    #[error("invalid header: {0}")]
    InvalidHeader(HeaderError),
}

impl From<Fault> for ParseError {
    #[inline]
    fn from(value: Fault) -> Self {
        match value {
            Fault::Syntax(httparse::Error::TooManyHeaders) => {
                Self::LimitExceeded(LimitKind::HeaderCount)
            }
            fault => Self::Malformed(Malformed::Scan(fault)),
        }
    }
}

impl From<ScanError<ParseError>> for ParseError {
    #[inline]
    fn from(value: ScanError<ParseError>) -> Self {
        match value {
            ScanError::Fault(fault) => fault.into(),
            ScanError::Handler(err) => err,
        }
    }
}

impl From<MessageError> for ParseError {
    #[inline]
    fn from(value: MessageError) -> Self {
        match value {
            MessageError::LimitExceeded(kind) => Self::LimitExceeded(kind),
            MessageError::InvalidHeader(err) => Self::Malformed(Malformed::InvalidHeader(err)),
        }
    }
}
