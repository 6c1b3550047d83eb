//! Fixed-capacity text fields.
//!
//! Each field of a [`ConnectionRecord`](super::ConnectionRecord) is an inline
//! byte array with an explicit capacity. One byte of that capacity is reserved
//! for a zero terminator, so a field of capacity `CAP` stores at most
//! `CAP - 1` bytes of text.

use crate::error::{UrlError, UrlResult};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Capacity of the host field, terminator included.
pub const HOST_CAPACITY: usize = 64;
/// Capacity of the port field, terminator included.
pub const PORT_CAPACITY: usize = 8;
/// Capacity of the database field, terminator included.
pub const DATABASE_CAPACITY: usize = 64;
/// Capacity of the user field, terminator included.
pub const USER_CAPACITY: usize = 32;
/// Capacity of the password field, terminator included.
pub const PASSWORD_CAPACITY: usize = 32;
/// Capacity of the options field, terminator included.
pub const OPTIONS_CAPACITY: usize = 128;

/// Names the fields of a connection record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Host name or address.
    Host,
    /// Port text.
    Port,
    /// Database name.
    Database,
    /// User name.
    User,
    /// Password.
    Password,
    /// Raw query-string tail.
    Options,
}

impl Field {
    /// Get the field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Port => "port",
            Self::Database => "database",
            Self::User => "user",
            Self::Password => "password",
            Self::Options => "options",
        }
    }

    /// Get the storage capacity of this field, terminator included.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Host => HOST_CAPACITY,
            Self::Port => PORT_CAPACITY,
            Self::Database => DATABASE_CAPACITY,
            Self::User => USER_CAPACITY,
            Self::Password => PASSWORD_CAPACITY,
            Self::Options => OPTIONS_CAPACITY,
        }
    }

    /// Get the maximum text length this field accepts.
    pub fn max_len(&self) -> usize {
        self.capacity() - 1
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Inline, bounded byte string with room for `CAP - 1` bytes and a terminator.
///
/// Bytes are stored as found in the source; no decoding is applied.
///
/// ```rust
/// use pgurl::connection::{Field, FixedStr};
///
/// let mut user = FixedStr::<8>::new();
/// user.copy_from(Field::User, b"admin").unwrap();
/// assert_eq!(user.as_bytes(), b"admin");
/// assert_eq!(user.as_bytes_with_nul(), b"admin\0");
///
/// assert!(user.copy_from(Field::User, b"administrator").is_err());
/// assert_eq!(user.as_bytes(), b"admin");
/// ```
#[derive(Clone)]
pub struct FixedStr<const CAP: usize> {
    buf: [u8; CAP],
    len: usize,
}

impl<const CAP: usize> FixedStr<CAP> {
    /// Total storage, terminator included.
    pub const CAPACITY: usize = CAP;

    /// Maximum number of text bytes.
    pub const MAX_LEN: usize = CAP - 1;

    /// Create an empty, zero-filled field.
    pub const fn new() -> Self {
        Self {
            buf: [0; CAP],
            len: 0,
        }
    }

    /// Create a field from a constant. Panics at compile time if it does not fit.
    pub(crate) const fn from_const(src: &[u8]) -> Self {
        assert!(src.len() < CAP);
        let mut buf = [0; CAP];
        let mut i = 0;
        while i < src.len() {
            buf[i] = src[i];
            i += 1;
        }
        Self {
            buf,
            len: src.len(),
        }
    }

    /// Create a field holding `src`.
    pub fn from_bytes(field: Field, src: &[u8]) -> UrlResult<Self> {
        let mut out = Self::new();
        out.copy_from(field, src)?;
        Ok(out)
    }

    /// Copy `src` into the field and terminate it.
    ///
    /// Fails with [`UrlError::FieldTooLarge`] when `src.len() + 1` exceeds the
    /// capacity; the field keeps its previous contents in that case.
    #[inline]
    pub fn copy_from(&mut self, field: Field, src: &[u8]) -> UrlResult<()> {
        let n = src.len();
        if n + 1 > CAP {
            return Err(UrlError::FieldTooLarge {
                field,
                len: n,
                max: Self::MAX_LEN,
            });
        }
        self.buf[..n].copy_from_slice(src);
        self.buf[n] = 0;
        self.len = n;
        Ok(())
    }

    /// Reset to the empty string.
    pub fn clear(&mut self) {
        self.buf[0] = 0;
        self.len = 0;
    }

    /// Get the stored bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Get the stored bytes followed by their terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// Get the stored text as UTF-8.
    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    /// Get the stored text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Number of stored bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no bytes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const CAP: usize> Default for FixedStr<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

// Bytes past the terminator may hold stale data from a longer earlier value,
// so equality and hashing look at the stored text only.
impl<const CAP: usize> PartialEq for FixedStr<CAP> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const CAP: usize> Eq for FixedStr<CAP> {}

impl<const CAP: usize> Hash for FixedStr<CAP> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<const CAP: usize> PartialEq<[u8]> for FixedStr<CAP> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const CAP: usize> PartialEq<str> for FixedStr<CAP> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const CAP: usize> PartialEq<&str> for FixedStr<CAP> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const CAP: usize> fmt::Debug for FixedStr<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl<const CAP: usize> fmt::Display for FixedStr<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
