use bytes::Bytes;
use std::str::{FromStr, Utf8Error};

use super::error::HeaderError;
use super::matches;

/// HTTP Header Value.
///
/// Values are kept as received. Obsolete non-ASCII text is accepted, so [`try_as_str`] may fail.
///
/// [`try_as_str`]: HeaderValue::try_as_str
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeaderValue {
    bytes: Bytes,
}

impl HeaderValue {
    /// Parse header value from static bytes.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header value.
    #[inline]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        match validate_header_value(bytes) {
            Ok(()) => Self {
                bytes: Bytes::from_static(bytes),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Parse header value from [`Bytes`] without copying.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header value.
    #[inline]
    pub fn from_bytes<B: Into<Bytes>>(value: B) -> Result<Self, HeaderError> {
        let bytes = value.into();
        match validate_header_value(&bytes) {
            Ok(()) => Ok(Self { bytes }),
            Err(err) => Err(err),
        }
    }

    /// Parse header value by copying from slice of bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header value.
    #[inline]
    pub fn from_slice<A: AsRef<[u8]>>(value: A) -> Result<Self, HeaderError> {
        match validate_header_value(value.as_ref()) {
            Ok(()) => Ok(Self {
                bytes: Bytes::copy_from_slice(value.as_ref()),
            }),
            Err(err) => Err(err),
        }
    }

    /// Returns header value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Try to returns header value as `str`.
    ///
    /// # Errors
    ///
    /// Returns error if the value contains obsolete text that is not valid UTF-8.
    #[inline]
    pub fn try_as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }

    /// Returns the value length.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the value is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ===== Parsing =====

const fn validate_header_value(mut bytes: &[u8]) -> Result<(), HeaderError> {
    let mut error = false;
    while let [byte, rest @ ..] = bytes {
        error |= !matches::is_header_value(*byte);
        bytes = rest;
    }
    if !error { Ok(()) } else { Err(HeaderError::Invalid) }
}

// ===== Traits =====

impl std::fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderValue").field(&self.bytes).finish()
    }
}

impl FromStr for HeaderValue {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s)
    }
}

impl PartialEq<[u8]> for HeaderValue {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl From<HeaderValue> for Bytes {
    #[inline]
    fn from(value: HeaderValue) -> Self {
        value.bytes
    }
}
