use bytes::Bytes;

use super::error::HeaderError;
use super::matches;

/// HTTP Header name.
///
/// # Case Normalization
///
/// Input is normalized to lowercase at construction time. [`from_static`][HeaderName::from_static]
/// will panic when name contains uppercase character.
///
/// Normalization requires copying the bytes. [`from_bytes`][HeaderName::from_bytes] keeps the
/// given buffer when it is already lowercase and only copies otherwise.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeaderName {
    /// is valid lowercase token
    bytes: Bytes,
}

impl HeaderName {
    /// Parse header name from static bytes.
    ///
    /// The input must not contains ASCII uppercase characters.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header name or contains ASCII uppercase characters.
    #[inline]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        match validate_lowercase(bytes) {
            Ok(()) => Self {
                bytes: Bytes::from_static(bytes),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Parse header name from [`Bytes`].
    ///
    /// If the input is already lowercase, the buffer is reused without copying.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header name.
    pub fn from_bytes<B: Into<Bytes>>(name: B) -> Result<Self, HeaderError> {
        let bytes = name.into();
        match validate_lowercase(&bytes) {
            Ok(()) => Ok(Self { bytes }),
            Err(HeaderError::Invalid) => copy_to_header_name(&bytes),
            Err(err) => Err(err),
        }
    }

    /// Parse header name by copying from slice of bytes.
    ///
    /// Input name is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header name.
    #[inline]
    pub fn from_slice<A: AsRef<[u8]>>(name: A) -> Result<Self, HeaderError> {
        copy_to_header_name(name.as_ref())
    }

    /// Extracts a string slice of the header name.
    ///
    /// The returned string will always in ASCII lowercase.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: validated as ASCII token
        unsafe { std::str::from_utf8_unchecked(&self.bytes) }
    }

    /// Returns the header name length.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Header names are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks that two header name are an ASCII case-insensitive match.
    #[inline]
    pub fn eq_ignore_ascii_case(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

// ===== Parser =====

const fn validate_lowercase(mut bytes: &[u8]) -> Result<(), HeaderError> {
    if bytes.is_empty() {
        return Err(HeaderError::Empty);
    }

    while let [byte, rest @ ..] = bytes {
        let mapped = matches::HEADER_NAME[*byte as usize];
        if mapped & 128 == 128 || mapped != *byte {
            return Err(HeaderError::Invalid);
        }
        bytes = rest;
    }

    Ok(())
}

fn copy_to_header_name(bytes: &[u8]) -> Result<HeaderName, HeaderError> {
    if bytes.is_empty() {
        return Err(HeaderError::Empty);
    }

    let mut name = vec![0; bytes.len()];

    for (output, input) in name.iter_mut().zip(bytes) {
        *output = matches::HEADER_NAME[*input as usize];

        // Any invalid character will have it MSB set
        if *output & 128 == 128 {
            return Err(HeaderError::Invalid);
        }
    }

    Ok(HeaderName {
        bytes: name.into(),
    })
}

// ===== Traits =====

impl std::fmt::Debug for HeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_str(), f)
    }
}

impl std::fmt::Display for HeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for HeaderName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for HeaderName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.eq_ignore_ascii_case(other)
    }
}

impl AsRef<str> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Standard header names used by the request assembler.
pub mod standard {
    use super::HeaderName;

    /// `content-length`
    pub const CONTENT_LENGTH: HeaderName = HeaderName::from_static(b"content-length");
    /// `transfer-encoding`
    pub const TRANSFER_ENCODING: HeaderName = HeaderName::from_static(b"transfer-encoding");
}
