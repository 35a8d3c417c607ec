use bytes::{Bytes, BytesMut};

use crate::span::Span;

/// Header field name received so far, waiting for its value.
#[derive(Debug, Default)]
pub enum PendingField<'a> {
    /// No field name is pending, the next event must not be a header value.
    #[default]
    None,
    /// A field name, possibly delivered in several pieces.
    Field(FieldName<'a>),
}

/// Accumulated header field name.
#[derive(Debug)]
pub enum FieldName<'a> {
    /// All pieces were contiguous in the input buffer.
    Span(Span<'a>),
    /// Pieces were not contiguous and had to be copied.
    Owned(BytesMut),
}

impl<'a> PendingField<'a> {
    /// Returns `true` if a field name is pending.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    /// Append a piece of field name.
    ///
    /// Pieces that directly follow each other in the same buffer are joined without copying.
    pub fn push(&mut self, piece: Span<'a>) {
        *self = match std::mem::take(self) {
            Self::None => Self::Field(FieldName::Span(piece)),
            Self::Field(FieldName::Span(prev)) => match prev.join(piece) {
                Some(joined) => Self::Field(FieldName::Span(joined)),
                None => {
                    let mut owned = BytesMut::with_capacity(prev.len() + piece.len());
                    owned.extend_from_slice(prev.as_slice());
                    owned.extend_from_slice(piece.as_slice());
                    Self::Field(FieldName::Owned(owned))
                }
            },
            Self::Field(FieldName::Owned(mut owned)) => {
                owned.extend_from_slice(piece.as_slice());
                Self::Field(FieldName::Owned(owned))
            }
        };
    }

    /// Take the pending field name, leaving [`PendingField::None`].
    #[inline]
    pub fn take(&mut self) -> Option<FieldName<'a>> {
        match std::mem::take(self) {
            Self::None => None,
            Self::Field(name) => Some(name),
        }
    }
}

impl FieldName<'_> {
    /// Returns the accumulated name bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Span(span) => span.as_slice(),
            Self::Owned(owned) => &owned[..],
        }
    }

    /// Returns the name length.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if no name bytes were received.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert into shared [`Bytes`], without copying when the name is a single span.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Span(span) => span.to_bytes(),
            Self::Owned(owned) => owned.freeze(),
        }
    }
}
