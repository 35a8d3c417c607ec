//! Zero-copy view into an input buffer.
use bytes::Bytes;

/// A non-owning `(buffer, offset, length)` view into a [`Bytes`] buffer.
///
/// A [`Span`] borrows the buffer it points into, so it can not outlive it. Data that must live
/// longer than the parse is promoted with [`Span::to_bytes`], which shares the buffer allocation
/// by reference counting instead of copying.
///
/// Spans do not implement [`PartialEq`], compare the referenced bytes with [`Span::as_slice`].
#[derive(Clone, Copy)]
pub struct Span<'a> {
    buf: &'a Bytes,
    offset: usize,
    len: usize,
}

impl<'a> Span<'a> {
    /// Create a span of `len` bytes starting at `offset`.
    ///
    /// Returns `None` if the range is out of the buffer bounds.
    #[inline]
    pub fn new(buf: &'a Bytes, offset: usize, len: usize) -> Option<Self> {
        match offset.checked_add(len) {
            Some(end) if end <= buf.len() => Some(Self { buf, offset, len }),
            _ => None,
        }
    }

    /// Create a span covering the whole buffer.
    #[inline]
    pub fn full(buf: &'a Bytes) -> Self {
        Self { buf, offset: 0, len: buf.len() }
    }

    /// Create a span from a slice that was borrowed out of `buf`.
    ///
    /// Returns `None` if `sub` does not point inside `buf`.
    pub fn from_subslice(buf: &'a Bytes, sub: &[u8]) -> Option<Self> {
        let start = buf.as_ptr() as usize;
        let offset = (sub.as_ptr() as usize).checked_sub(start)?;
        Self::new(buf, offset, sub.len())
    }

    /// Returns the referenced bytes.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// Returns the referenced bytes as shared [`Bytes`], without copying.
    #[inline]
    pub fn to_bytes(&self) -> Bytes {
        self.buf.slice(self.offset..self.offset + self.len)
    }

    /// Returns the offset into the buffer.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the span length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the span has a length of zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `next` starts exactly where this span ends in the same buffer.
    #[inline]
    pub fn is_followed_by(&self, next: &Span<'_>) -> bool {
        std::ptr::eq(self.buf, next.buf) && self.offset + self.len == next.offset
    }

    /// Join with a span that directly follows this one.
    ///
    /// Returns `None` if the spans are not contiguous, see [`Span::is_followed_by`].
    #[inline]
    pub fn join(self, next: Span<'a>) -> Option<Span<'a>> {
        if self.is_followed_by(&next) {
            Some(Span { len: self.len + next.len, ..self })
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("bytes", &self.buf.slice(self.offset..self.offset + self.len))
            .finish()
    }
}
