const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB
const DEFAULT_MAX_HEADER_SIZE: usize = 64 * 1024; // 64KB
const DEFAULT_MAX_HEADERS: usize = 64;

/// Size bounds of a [`Message`][super::Message].
///
/// Exceeding any bound fails the operation that would cross it, nothing is truncated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit {
    max_body_size: usize,
    max_header_size: usize,
    max_headers: usize,
}

impl Limit {
    /// Create a limit that bounds the body at `max_body_size` bytes.
    ///
    /// Header bounds are the default ones.
    #[inline]
    pub const fn new(max_body_size: usize) -> Self {
        Self {
            max_body_size,
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            max_headers: DEFAULT_MAX_HEADERS,
        }
    }

    /// Set the maximum sum of header name and value bytes.
    #[inline]
    pub const fn with_max_header_size(mut self, max_header_size: usize) -> Self {
        self.max_header_size = max_header_size;
        self
    }

    /// Set the maximum number of header entries.
    #[inline]
    pub const fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    /// Returns the maximum body size.
    #[inline]
    pub const fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Returns the maximum sum of header name and value bytes.
    #[inline]
    pub const fn max_header_size(&self) -> usize {
        self.max_header_size
    }

    /// Returns the maximum number of header entries.
    #[inline]
    pub const fn max_headers(&self) -> usize {
        self.max_headers
    }
}

impl Default for Limit {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_SIZE)
    }
}

impl From<usize> for Limit {
    #[inline]
    fn from(max_body_size: usize) -> Self {
        Self::new(max_body_size)
    }
}
