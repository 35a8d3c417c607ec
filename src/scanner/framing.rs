use super::error::Fault;
use crate::headers::standard::{CONTENT_LENGTH, TRANSFER_ENCODING};

/// How the message body is delimited.
///
/// [RFC9112](https://www.rfc-editor.org/rfc/rfc9112#name-message-body-length)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    /// Request without `Content-Length` or `Transfer-Encoding` has no body.
    Empty,
    /// Body is exactly this many bytes.
    Length(u64),
    /// Body is a sequence of chunks terminated by a last-chunk and trailers.
    Chunked,
}

impl Framing {
    pub(crate) fn from_headers(headers: &[httparse::Header<'_>]) -> Result<Self, Fault> {
        let mut length = None;
        let mut codings = Codings::None;

        for header in headers {
            if header.name.eq_ignore_ascii_case(TRANSFER_ENCODING.as_str()) {
                codings = codings.extend(header.value)?;
            } else if header.name.eq_ignore_ascii_case(CONTENT_LENGTH.as_str()) {
                let value = parse_content_length(header.value).ok_or(Fault::InvalidContentLength)?;
                match length {
                    Some(prev) if prev != value => return Err(Fault::InvalidContentLength),
                    _ => length = Some(value),
                }
            }
        }

        match (length, codings) {
            (Some(_), Codings::Chunked | Codings::Other) => Err(Fault::AmbiguousLength),
            (_, Codings::Other) => Err(Fault::InvalidTransferEncoding),
            (None, Codings::Chunked) => Ok(Self::Chunked),
            (Some(length), Codings::None) => Ok(Self::Length(length)),
            (None, Codings::None) => Ok(Self::Empty),
        }
    }
}

/// Transfer codings seen so far.
#[derive(Clone, Copy)]
enum Codings {
    None,
    /// last coding is chunked
    Chunked,
    /// last coding is not chunked
    Other,
}

impl Codings {
    fn extend(mut self, value: &[u8]) -> Result<Self, Fault> {
        for coding in value.split(|&b| b == b',').map(<[u8]>::trim_ascii) {
            if coding.is_empty() {
                continue;
            }
            if coding.eq_ignore_ascii_case(b"chunked") {
                // chunked must not be applied more than once
                if matches!(self, Self::Chunked) {
                    return Err(Fault::InvalidTransferEncoding);
                }
                self = Self::Chunked;
            } else {
                if matches!(self, Self::Chunked) {
                    return Err(Fault::InvalidTransferEncoding);
                }
                self = Self::Other;
            }
        }
        Ok(self)
    }
}

/// Content-Length = 1*DIGIT
fn parse_content_length(value: &[u8]) -> Option<u64> {
    let value = value.trim_ascii();
    if value.is_empty() {
        return None;
    }
    let mut length = 0u64;
    for &byte in value {
        if !byte.is_ascii_digit() {
            return None;
        }
        length = length.checked_mul(10)?.checked_add(u64::from(byte - b'0'))?;
    }
    Some(length)
}

#[cfg(test)]
mod test {
    use super::*;

    fn framing(headers: &[(&'static str, &'static [u8])]) -> Result<Framing, Fault> {
        let headers: Vec<_> = headers
            .iter()
            .map(|&(name, value)| httparse::Header { name, value })
            .collect();
        Framing::from_headers(&headers)
    }

    #[test]
    fn test_framing() {
        assert_eq!(framing(&[]), Ok(Framing::Empty));
        assert_eq!(framing(&[("Host", b"a")]), Ok(Framing::Empty));
        assert_eq!(framing(&[("Content-Length", b"4")]), Ok(Framing::Length(4)));
        assert_eq!(framing(&[("content-length", b" 0 ")]), Ok(Framing::Length(0)));
        assert_eq!(
            framing(&[("Content-Length", b"4"), ("Content-Length", b"4")]),
            Ok(Framing::Length(4))
        );
        assert_eq!(framing(&[("Transfer-Encoding", b"chunked")]), Ok(Framing::Chunked));
        assert_eq!(framing(&[("Transfer-Encoding", b"gzip, Chunked")]), Ok(Framing::Chunked));
        assert_eq!(
            framing(&[("Transfer-Encoding", b"gzip"), ("Transfer-Encoding", b"chunked")]),
            Ok(Framing::Chunked)
        );
    }

    #[test]
    fn test_framing_error() {
        use Fault::*;

        assert_eq!(framing(&[("Content-Length", b"")]), Err(InvalidContentLength));
        assert_eq!(framing(&[("Content-Length", b"-1")]), Err(InvalidContentLength));
        assert_eq!(framing(&[("Content-Length", b"4a")]), Err(InvalidContentLength));
        assert_eq!(
            framing(&[("Content-Length", b"99999999999999999999999")]),
            Err(InvalidContentLength)
        );
        assert_eq!(
            framing(&[("Content-Length", b"4"), ("Content-Length", b"5")]),
            Err(InvalidContentLength)
        );
        assert_eq!(framing(&[("Transfer-Encoding", b"gzip")]), Err(InvalidTransferEncoding));
        assert_eq!(
            framing(&[("Transfer-Encoding", b"chunked, gzip")]),
            Err(InvalidTransferEncoding)
        );
        assert_eq!(
            framing(&[("Transfer-Encoding", b"chunked, chunked")]),
            Err(InvalidTransferEncoding)
        );
        assert_eq!(
            framing(&[("Transfer-Encoding", b"chunked"), ("Content-Length", b"4")]),
            Err(AmbiguousLength)
        );
    }
}
