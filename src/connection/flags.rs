//! Presence flags for optional connection string segments.
//!
//! A flag records that a segment was *found in the source*, which is
//! independent of the value stored in the field. A record without
//! [`PresenceFlags::HAS_PORT`] still holds the port text `"5432"`.
//!
//! ```rust
//! use pgurl::connection::PresenceFlags;
//!
//! let flags = PresenceFlags::HAS_USER | PresenceFlags::HAS_PASSWORD;
//! assert!(flags.contains(PresenceFlags::HAS_USER));
//! assert!(!flags.contains(PresenceFlags::HAS_PORT));
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Set of segments present in a parsed connection string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PresenceFlags(u8);

impl PresenceFlags {
    /// Empty set.
    pub const NONE: Self = Self(0);

    /// A user name was present.
    pub const HAS_USER: Self = Self(1 << 0);

    /// A password was present. Never set without `HAS_USER`.
    pub const HAS_PASSWORD: Self = Self(1 << 1);

    /// An explicit port was present.
    pub const HAS_PORT: Self = Self(1 << 2);

    /// A database segment was present.
    pub const HAS_DATABASE: Self = Self(1 << 3);

    /// An options segment was present.
    pub const HAS_OPTIONS: Self = Self(1 << 4);

    /// The options segment starts with `sslmode=require`.
    pub const SSL_ENABLED: Self = Self(1 << 5);

    /// Create an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self::NONE
    }

    /// Create a set from raw bits. Unknown bits are dropped.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0b0011_1111)
    }

    /// Get raw bits.
    #[must_use]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if all flags in `other` are set.
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if no flag is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Set the flags in `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the flags in `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Set or clear the flags in `other`.
    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    /// Iterate over the names of the set flags.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        FLAG_NAMES
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }
}

static FLAG_NAMES: [(PresenceFlags, &str); 6] = [
    (PresenceFlags::HAS_USER, "HAS_USER"),
    (PresenceFlags::HAS_PASSWORD, "HAS_PASSWORD"),
    (PresenceFlags::HAS_PORT, "HAS_PORT"),
    (PresenceFlags::HAS_DATABASE, "HAS_DATABASE"),
    (PresenceFlags::HAS_OPTIONS, "HAS_OPTIONS"),
    (PresenceFlags::SSL_ENABLED, "SSL_ENABLED"),
];

impl BitOr for PresenceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PresenceFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PresenceFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for PresenceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for name in self.names() {
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut flags = PresenceFlags::empty();
        flags.insert(PresenceFlags::HAS_OPTIONS);
        flags.insert(PresenceFlags::SSL_ENABLED);
        assert!(flags.contains(PresenceFlags::HAS_OPTIONS | PresenceFlags::SSL_ENABLED));

        flags.remove(PresenceFlags::SSL_ENABLED);
        assert!(flags.contains(PresenceFlags::HAS_OPTIONS));
        assert!(!flags.contains(PresenceFlags::SSL_ENABLED));
    }

    #[test]
    fn test_set() {
        let mut flags = PresenceFlags::HAS_PORT;
        flags.set(PresenceFlags::HAS_PORT, false);
        assert!(flags.is_empty());
        flags.set(PresenceFlags::HAS_DATABASE, true);
        assert_eq!(flags, PresenceFlags::HAS_DATABASE);
    }

    #[test]
    fn test_bits_layout() {
        assert_eq!(PresenceFlags::HAS_USER.bits(), 0x01);
        assert_eq!(PresenceFlags::SSL_ENABLED.bits(), 0x20);
        assert_eq!(PresenceFlags::from_bits_truncate(0xff).bits(), 0x3f);
    }

    #[test]
    fn test_debug_lists_names() {
        let flags = PresenceFlags::HAS_USER | PresenceFlags::HAS_DATABASE;
        assert_eq!(format!("{flags:?}"), "HAS_USER | HAS_DATABASE");
        assert_eq!(format!("{:?}", PresenceFlags::NONE), "NONE");
    }
}
