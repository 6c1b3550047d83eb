//! # pgurl
//!
//! Fixed-layout PostgreSQL connection string parser and canonical encoder.
//!
//! pgurl provides:
//! - A decoder that splits `postgres(ql)://` URLs into bounded, inline fields
//! - An encoder that writes the canonical `postgresql://` form into a
//!   caller-provided buffer
//! - Presence flags that tell an absent segment apart from an empty one
//! - Checked copies: oversized segments are errors, never truncated
//!
//! ## Quick Start
//!
//! ```rust
//! use pgurl::{ConnectionRecord, MAX_ENCODED_LEN, PresenceFlags, encode, parse};
//!
//! let (record, consumed) = parse(b"postgres://app:secret@db:6543/orders?sslmode=require")?;
//! assert_eq!(consumed, 52);
//! assert_eq!(record.host(), "db");
//! assert_eq!(record.user().unwrap(), "app");
//! assert!(record.ssl_enabled());
//! assert!(record.flags().contains(PresenceFlags::HAS_PORT));
//!
//! let mut buf = [0u8; MAX_ENCODED_LEN];
//! let len = encode(&record, &mut buf)?;
//! assert_eq!(&buf[..len], b"postgresql://app:secret@db:6543/orders?sslmode=require");
//!
//! let record: ConnectionRecord = "postgresql://localhost".parse()?;
//! assert_eq!(record.port(), "5432");
//! # Ok::<(), pgurl::UrlError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod connection;
pub mod error;
pub mod logging;

// Re-export key types at the crate root
pub use connection::{
    ConnectionRecord, DEFAULT_PORT, Field, FixedStr, MAX_ENCODED_LEN, PresenceFlags, encode,
    parse,
};
pub use error::{UrlError, UrlResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::connection::{ConnectionRecord, PresenceFlags, encode, parse};
    pub use crate::error::{UrlError, UrlResult};
}
