use super::{
    HeaderName, HeaderValue,
    field::{GetAll, HeaderField},
    iter::Iter,
};

/// HTTP Headers Multimap.
///
/// Lookup is ASCII case-insensitive. Duplicate header names are kept as separate values in the
/// order they were appended.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: Vec<HeaderField>,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create new empty [`HeaderMap`] with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of header values, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the total number of values the map can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.fields.capacity()
    }

    /// Returns `true` if headers has no element.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ===== Lookup =====

impl HeaderMap {
    /// Returns `true` if the map contains a header value for given header name.
    #[inline]
    pub fn contains_key<K: AsHeaderName>(&self, name: K) -> bool {
        self.field(name.as_header_str()).is_some()
    }

    /// Returns a reference to the first header value corresponding to the given header name.
    ///
    /// ```rust
    /// use h1_assemble::headers::{HeaderMap, HeaderName, HeaderValue};
    ///
    /// let mut map = HeaderMap::new();
    /// map.append(HeaderName::from_static(b"content-type"), HeaderValue::from_static(b"text/html"));
    /// assert_eq!(map.get("Content-Type").unwrap(), "text/html");
    /// ```
    #[inline]
    pub fn get<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        self.field(name.as_header_str()).map(HeaderField::value)
    }

    /// Returns an iterator to all header values corresponding to the given header name.
    #[inline]
    pub fn get_all<'a>(&'a self, name: &'a str) -> GetAll<'a> {
        GetAll::new(&self.fields, name)
    }

    /// Returns an iterator over headers as name and value pair, in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.fields)
    }

    fn field(&self, name: &str) -> Option<&HeaderField> {
        self.fields.iter().find(|field| field.name().eq_ignore_ascii_case(name))
    }
}

// ===== Mutation =====

impl HeaderMap {
    /// Removes every value of a header from the map, returning the first header value if the
    /// key was previously in the map.
    pub fn remove<K: AsHeaderName>(&mut self, name: K) -> Option<HeaderValue> {
        let name = name.as_header_str();
        let index = self.fields.iter().position(|field| field.name().eq_ignore_ascii_case(name))?;
        let (_, first) = self.fields.remove(index).into_parts();
        // the rest of duplicate header values are dropped
        self.fields.retain(|field| !field.name().eq_ignore_ascii_case(name));
        Some(first)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did have this key present, every previous value is removed, and the first old
    /// value is returned.
    ///
    /// If the map did not have this header key present, [`None`] is returned.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) -> Option<HeaderValue> {
        let old = self.remove(&name);
        self.fields.push(HeaderField::new(name, value));
        old
    }

    /// Append a header key and value into the map.
    ///
    /// Unlike [`insert`][HeaderMap::insert], if header key is present, header value is still
    /// appended as extra value.
    #[inline]
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.fields.push(HeaderField::new(name, value));
    }

    /// Reserves capacity for at least `additional` more headers.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.fields.reserve(additional);
    }

    /// Clear headers map, removing all the value.
    ///
    /// The allocated capacity is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl std::fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ===== Ref Traits =====

/// A type that can be used for [`HeaderMap`] lookup.
///
/// Lookup compares names ASCII case-insensitively, so any casing can be used.
#[allow(private_bounds)]
pub trait AsHeaderName: Sealed { }
trait Sealed: Sized {
    fn as_header_str(&self) -> &str;
}

impl AsHeaderName for &str { }
impl Sealed for &str {
    #[inline]
    fn as_header_str(&self) -> &str {
        self
    }
}

impl AsHeaderName for HeaderName { }
impl Sealed for HeaderName {
    #[inline]
    fn as_header_str(&self) -> &str {
        self.as_str()
    }
}

// blanket implementation
impl<K: AsHeaderName> AsHeaderName for &K { }
impl<S: Sealed> Sealed for &S {
    #[inline]
    fn as_header_str(&self) -> &str {
        S::as_header_str(self)
    }
}
