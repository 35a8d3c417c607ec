/// HTTP Version.
///
/// [httpwg](https://httpwg.org/specs/rfc9112.html#http.version)
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Version {
    major: u8,
    minor: u8,
}

impl Version {
    /// `HTTP/0.9`
    pub const HTTP_09: Version = Version::new(0, 9);

    /// `HTTP/1.0`
    pub const HTTP_10: Version = Version::new(1, 0);

    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version::new(1, 1);

    /// Create version from major and minor digits.
    #[inline]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Returns the major version digit.
    #[inline]
    pub const fn major(&self) -> u8 {
        self.major
    }

    /// Returns the minor version digit.
    #[inline]
    pub const fn minor(&self) -> u8 {
        self.minor
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Version {
        Version::HTTP_11
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

impl std::fmt::Debug for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
