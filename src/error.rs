//! Error types for connection string decoding and encoding.
//!
//! Every failure is reported to the immediate caller. A decode either returns a
//! fully populated [`ConnectionRecord`](crate::ConnectionRecord) or an error,
//! never a partially filled record.
//!
//! ```rust
//! use pgurl::{UrlError, parse};
//!
//! let err = parse(b"mysql://localhost/db").unwrap_err();
//! assert!(matches!(err, UrlError::MalformedScheme));
//!
//! let err = parse(b"pg://x").unwrap_err();
//! assert!(matches!(err, UrlError::InputTooShort { len: 6, min: 11 }));
//! ```

use crate::connection::Field;
use thiserror::Error;

/// Result type for connection string operations.
pub type UrlResult<T> = Result<T, UrlError>;

/// Errors that can occur while decoding or encoding a connection string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The input starts with neither `postgres://` nor `postgresql://`.
    #[error("Malformed scheme: expected postgres:// or postgresql://")]
    MalformedScheme,

    /// The input is shorter than the shortest recognized scheme prefix.
    #[error("Input too short: {len} bytes, need at least {min}")]
    InputTooShort {
        /// Length of the rejected input.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },

    /// A segment does not fit into its fixed-capacity field.
    #[error("Field '{field}' too large: {len} bytes, maximum is {max}")]
    FieldTooLarge {
        /// The field that overflowed.
        field: Field,
        /// Length of the offending segment.
        len: usize,
        /// Maximum number of bytes the field can hold.
        max: usize,
    },

    /// The encoder output does not fit into the caller's buffer.
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required for the canonical form.
        needed: usize,
        /// Bytes available in the destination buffer.
        available: usize,
    },

    /// A password was supplied without a user name.
    #[error("Password given without a user name")]
    PasswordWithoutUser,

    /// Environment variable not found.
    #[error("Environment variable not found: {0}")]
    EnvNotFound(String),
}

impl UrlError {
    /// Check if this error was caused by a field exceeding its capacity.
    pub fn is_field_too_large(&self) -> bool {
        matches!(self, Self::FieldTooLarge { .. })
    }

    /// The field that caused the error, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::FieldTooLarge { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = UrlError::FieldTooLarge {
            field: Field::User,
            len: 40,
            max: 31,
        };
        assert_eq!(
            err.to_string(),
            "Field 'user' too large: 40 bytes, maximum is 31"
        );

        let err = UrlError::BufferTooSmall {
            needed: 30,
            available: 16,
        };
        assert!(err.to_string().contains("need 30 bytes"));
    }

    #[test]
    fn test_field_accessor() {
        let err = UrlError::FieldTooLarge {
            field: Field::Port,
            len: 9,
            max: 7,
        };
        assert!(err.is_field_too_large());
        assert_eq!(err.field(), Some(Field::Port));
        assert_eq!(UrlError::MalformedScheme.field(), None);
    }
}
