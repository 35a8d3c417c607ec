/// Malformed input detected by the [`Scanner`][super::Scanner].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    /// Request line or header block is not valid HTTP/1.x syntax.
    #[error("{0}")]
    Syntax(httparse::Error),
    /// Input ended before the message was complete.
    #[error("incomplete message")]
    Incomplete,
    /// `Content-Length` is not a number, or multiple values disagree.
    #[error("invalid content-length")]
    InvalidContentLength,
    /// `Transfer-Encoding` does not end with `chunked`.
    #[error("invalid transfer-encoding")]
    InvalidTransferEncoding,
    /// Both `Content-Length` and `Transfer-Encoding` are present.
    #[error("both content-length and transfer-encoding are present")]
    AmbiguousLength,
    /// Chunk size line or chunk delimiter is invalid.
    #[error("invalid chunk")]
    InvalidChunk,
    /// Token does not point into the scanned buffer.
    #[error("token outside of the input buffer")]
    OutOfBounds,
}

/// An error returned from [`Scanner::execute`][super::Scanner::execute].
#[derive(Debug, thiserror::Error)]
pub enum ScanError<E> {
    /// Input is malformed.
    #[error(transparent)]
    Fault(#[from] Fault),
    /// A [`Handler`][super::Handler] callback aborted the scan.
    #[error("scan aborted: {0}")]
    Handler(E),
}

impl<E> From<httparse::Error> for ScanError<E> {
    #[inline]
    fn from(value: httparse::Error) -> Self {
        Self::Fault(Fault::Syntax(value))
    }
}
