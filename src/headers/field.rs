use super::{HeaderName, HeaderValue};

/// Header Field.
///
/// A single [`HeaderName`] and [`HeaderValue`] pair as it appeared in the message.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderField {
    #[inline]
    pub(crate) const fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    /// Returns reference to [`HeaderName`].
    #[inline]
    pub const fn name(&self) -> &HeaderName {
        &self.name
    }

    /// Returns reference to [`HeaderValue`].
    #[inline]
    pub const fn value(&self) -> &HeaderValue {
        &self.value
    }

    /// Consume [`HeaderField`] into [`HeaderName`] and [`HeaderValue`].
    #[inline]
    pub fn into_parts(self) -> (HeaderName, HeaderValue) {
        (self.name, self.value)
    }
}

impl std::fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderField")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

// ===== Iterator =====

/// Iterator returned from [`HeaderMap::get_all`][super::HeaderMap::get_all].
pub struct GetAll<'a> {
    fields: std::slice::Iter<'a, HeaderField>,
    name: &'a str,
}

impl<'a> GetAll<'a> {
    pub(crate) fn new(fields: &'a [HeaderField], name: &'a str) -> Self {
        Self {
            fields: fields.iter(),
            name,
        }
    }

    /// Returns `true` if there is still remaining value.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.fields.as_slice().iter().any(|field| field.name.eq_ignore_ascii_case(self.name))
    }
}

impl<'a> Iterator for GetAll<'a> {
    type Item = &'a HeaderValue;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.name;
        self.fields
            .find(|field| field.name.eq_ignore_ascii_case(name))
            .map(HeaderField::value)
    }
}

impl std::fmt::Debug for GetAll<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list()
            .entries(Self {
                fields: self.fields.clone(),
                name: self.name,
            })
            .finish()
    }
}
