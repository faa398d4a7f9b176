use std::fmt;

/// Immutable byte sequence. Its canonical encoding is the bytes themselves.
///
/// Equality only considers other byte strings; there is no integer fallback here, unlike
/// [`Integer::equals`](super::Integer::equals).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteString(Box<[u8]>);

impl ByteString {
    #[must_use]
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if any byte is non-zero.
    #[must_use]
    pub fn to_boolean(&self) -> bool {
        self.0.iter().any(|&b| b != 0)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &*self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
