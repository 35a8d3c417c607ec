use crate::headers::HeaderError;

/// Bound of a [`Limit`][super::Limit] that was crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitKind {
    /// Accumulated body size.
    Body,
    /// Sum of header name and value bytes.
    HeaderSize,
    /// Number of header entries.
    HeaderCount,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Body => "body size",
            Self::HeaderSize => "header size",
            Self::HeaderCount => "header count",
        })
    }
}

/// An error that can occur while building a [`Message`][super::Message].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageError {
    /// A [`Limit`][super::Limit] bound would be exceeded.
    LimitExceeded(LimitKind),
    /// Header name or value is invalid.
    InvalidHeader(HeaderError),
}

impl std::error::Error for MessageError {}

impl std::fmt::Display for MessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LimitExceeded(kind) => write!(f, "{kind} limit exceeded"),
            Self::InvalidHeader(err) => write!(f, "invalid header: {err}"),
        }
    }
}

impl From<HeaderError> for MessageError {
    #[inline]
    fn from(value: HeaderError) -> Self {
        Self::InvalidHeader(value)
    }
}
