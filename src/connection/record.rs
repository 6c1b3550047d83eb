//! The fixed-layout connection record.

use super::field::{
    DATABASE_CAPACITY, Field, FixedStr, HOST_CAPACITY, OPTIONS_CAPACITY, PASSWORD_CAPACITY,
    PORT_CAPACITY, USER_CAPACITY,
};
use super::flags::PresenceFlags;
use crate::error::{UrlError, UrlResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Port used when the connection string names none.
pub const DEFAULT_PORT: &str = "5432";

/// Numeric form of [`DEFAULT_PORT`].
pub const DEFAULT_PORT_NUMBER: u16 = 5432;

/// Options prefix that marks a connection as SSL-required.
pub const SSL_REQUIRE_PREFIX: &[u8] = b"sslmode=require";

const DEFAULT_PORT_FIELD: FixedStr<PORT_CAPACITY> = FixedStr::from_const(DEFAULT_PORT.as_bytes());

/// Check whether an options tail requests SSL.
///
/// Only a leading `sslmode=require` counts. A later occurrence, as in
/// `x=1&sslmode=require`, is not detected.
#[inline]
pub(crate) fn requires_ssl(options: &[u8]) -> bool {
    options.starts_with(SSL_REQUIRE_PREFIX)
}

/// A PostgreSQL connection string decomposed into fixed-capacity fields.
///
/// Records come from [`parse`](super::parse) or are built with
/// [`ConnectionRecord::new`] and the setters. Every setter keeps the record
/// consistent: a password always comes with a user, a record without an
/// explicit port holds [`DEFAULT_PORT`], and `SSL_ENABLED` follows the options.
///
/// ```rust
/// use pgurl::ConnectionRecord;
///
/// let mut record = ConnectionRecord::parse("postgres://app@db.internal/orders").unwrap();
/// assert_eq!(record.host(), "db.internal");
/// assert_eq!(record.port(), "5432");
///
/// record.set_port(Some("6543")).unwrap();
/// assert_eq!(record.to_url(), "postgresql://app@db.internal:6543/orders");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecordRepr", into = "RecordRepr")]
pub struct ConnectionRecord {
    pub(crate) host: FixedStr<HOST_CAPACITY>,
    pub(crate) port: FixedStr<PORT_CAPACITY>,
    pub(crate) database: FixedStr<DATABASE_CAPACITY>,
    pub(crate) user: FixedStr<USER_CAPACITY>,
    pub(crate) password: FixedStr<PASSWORD_CAPACITY>,
    pub(crate) options: FixedStr<OPTIONS_CAPACITY>,
    pub(crate) flags: PresenceFlags,
}

impl ConnectionRecord {
    /// Create an empty record: no host, default port, no optional segments.
    pub const fn new() -> Self {
        Self {
            host: FixedStr::new(),
            port: DEFAULT_PORT_FIELD,
            database: FixedStr::new(),
            user: FixedStr::new(),
            password: FixedStr::new(),
            options: FixedStr::new(),
            flags: PresenceFlags::NONE,
        }
    }

    /// Create a record for `host` with every optional segment absent.
    pub fn with_host(host: &str) -> UrlResult<Self> {
        let mut record = Self::new();
        record.set_host(host)?;
        Ok(record)
    }

    /// Parse a connection string.
    ///
    /// See [`parse`](super::parse) for the accepted grammar.
    pub fn parse(url: &str) -> UrlResult<Self> {
        super::parse(url.as_bytes()).map(|(record, _)| record)
    }

    /// Get the presence flags.
    pub fn flags(&self) -> PresenceFlags {
        self.flags
    }

    /// Get the host.
    pub fn host(&self) -> &FixedStr<HOST_CAPACITY> {
        &self.host
    }

    /// Get the port text. Holds [`DEFAULT_PORT`] unless a port was given.
    pub fn port(&self) -> &FixedStr<PORT_CAPACITY> {
        &self.port
    }

    /// Get the port as a number, if the port text is a valid `u16`.
    pub fn port_number(&self) -> Option<u16> {
        self.port.to_str().ok()?.parse().ok()
    }

    /// Check if the port was given explicitly.
    pub fn has_explicit_port(&self) -> bool {
        self.flags.contains(PresenceFlags::HAS_PORT)
    }

    /// Get the database name, if a database segment was present.
    pub fn database(&self) -> Option<&FixedStr<DATABASE_CAPACITY>> {
        self.flags
            .contains(PresenceFlags::HAS_DATABASE)
            .then_some(&self.database)
    }

    /// Get the user name.
    pub fn user(&self) -> Option<&FixedStr<USER_CAPACITY>> {
        self.flags
            .contains(PresenceFlags::HAS_USER)
            .then_some(&self.user)
    }

    /// Get the password.
    pub fn password(&self) -> Option<&FixedStr<PASSWORD_CAPACITY>> {
        self.flags
            .contains(PresenceFlags::HAS_PASSWORD)
            .then_some(&self.password)
    }

    /// Get the raw options tail (everything after `?`).
    pub fn options(&self) -> Option<&FixedStr<OPTIONS_CAPACITY>> {
        self.flags
            .contains(PresenceFlags::HAS_OPTIONS)
            .then_some(&self.options)
    }

    /// Check if the options start with `sslmode=require`.
    pub fn ssl_enabled(&self) -> bool {
        self.flags.contains(PresenceFlags::SSL_ENABLED)
    }

    /// Replace the host.
    pub fn set_host(&mut self, host: &str) -> UrlResult<()> {
        self.host.copy_from(Field::Host, host.as_bytes())
    }

    /// Set an explicit port, or restore the default with `None`.
    pub fn set_port(&mut self, port: Option<&str>) -> UrlResult<()> {
        match port {
            Some(port) => {
                self.port.copy_from(Field::Port, port.as_bytes())?;
                self.flags.insert(PresenceFlags::HAS_PORT);
            }
            None => {
                self.port = DEFAULT_PORT_FIELD;
                self.flags.remove(PresenceFlags::HAS_PORT);
            }
        }
        Ok(())
    }

    /// Set or remove the database segment.
    pub fn set_database(&mut self, database: Option<&str>) -> UrlResult<()> {
        match database {
            Some(database) => {
                self.database
                    .copy_from(Field::Database, database.as_bytes())?;
                self.flags.insert(PresenceFlags::HAS_DATABASE);
            }
            None => {
                self.database.clear();
                self.flags.remove(PresenceFlags::HAS_DATABASE);
            }
        }
        Ok(())
    }

    /// Set the user name and optional password.
    ///
    /// Both values are checked before either is stored.
    pub fn set_credentials(&mut self, user: &str, password: Option<&str>) -> UrlResult<()> {
        let user = FixedStr::from_bytes(Field::User, user.as_bytes())?;
        let password = password
            .map(|p| FixedStr::from_bytes(Field::Password, p.as_bytes()))
            .transpose()?;

        self.user = user;
        self.flags.insert(PresenceFlags::HAS_USER);
        match password {
            Some(password) => {
                self.password = password;
                self.flags.insert(PresenceFlags::HAS_PASSWORD);
            }
            None => {
                self.password.clear();
                self.flags.remove(PresenceFlags::HAS_PASSWORD);
            }
        }
        Ok(())
    }

    /// Remove user name and password.
    pub fn clear_credentials(&mut self) {
        self.user.clear();
        self.password.clear();
        self.flags
            .remove(PresenceFlags::HAS_USER | PresenceFlags::HAS_PASSWORD);
    }

    /// Set or remove the options tail. `SSL_ENABLED` is recomputed.
    pub fn set_options(&mut self, options: Option<&str>) -> UrlResult<()> {
        match options {
            Some(options) => {
                self.options.copy_from(Field::Options, options.as_bytes())?;
                self.flags.insert(PresenceFlags::HAS_OPTIONS);
                self.flags
                    .set(PresenceFlags::SSL_ENABLED, requires_ssl(options.as_bytes()));
            }
            None => {
                self.options.clear();
                self.flags
                    .remove(PresenceFlags::HAS_OPTIONS | PresenceFlags::SSL_ENABLED);
            }
        }
        Ok(())
    }
}

impl Default for ConnectionRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ConnectionRecord {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ConnectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRecord")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database())
            .field("user", &self.user())
            .field("password", &self.password().map(|_| "***"))
            .field("options", &self.options())
            .field("flags", &self.flags)
            .finish()
    }
}

/// Serialized shape of a record: absent segments are `None`.
#[derive(Serialize, Deserialize)]
struct RecordRepr {
    host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<String>,
    #[serde(default, skip_deserializing)]
    ssl_enabled: bool,
}

impl From<ConnectionRecord> for RecordRepr {
    fn from(record: ConnectionRecord) -> Self {
        Self {
            host: record.host.to_string(),
            port: record.has_explicit_port().then(|| record.port.to_string()),
            database: record.database().map(ToString::to_string),
            user: record.user().map(ToString::to_string),
            password: record.password().map(ToString::to_string),
            options: record.options().map(ToString::to_string),
            ssl_enabled: record.ssl_enabled(),
        }
    }
}

impl TryFrom<RecordRepr> for ConnectionRecord {
    type Error = UrlError;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        let mut record = Self::with_host(&repr.host)?;
        record.set_port(repr.port.as_deref())?;
        record.set_database(repr.database.as_deref())?;
        match (repr.user.as_deref(), repr.password.as_deref()) {
            (Some(user), password) => record.set_credentials(user, password)?,
            (None, Some(_)) => return Err(UrlError::PasswordWithoutUser),
            (None, None) => {}
        }
        record.set_options(repr.options.as_deref())?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = ConnectionRecord::new();
        assert!(record.host().is_empty());
        assert_eq!(record.port(), "5432");
        assert_eq!(record.port_number(), Some(DEFAULT_PORT_NUMBER));
        assert!(record.flags().is_empty());
        assert!(record.database().is_none());
        assert!(record.user().is_none());
    }

    #[test]
    fn test_set_port_and_reset() {
        let mut record = ConnectionRecord::with_host("localhost").unwrap();
        record.set_port(Some("6543")).unwrap();
        assert!(record.has_explicit_port());
        assert_eq!(record.port_number(), Some(6543));

        record.set_port(None).unwrap();
        assert!(!record.has_explicit_port());
        assert_eq!(record.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_port_number_non_numeric() {
        let mut record = ConnectionRecord::new();
        record.set_port(Some("pgport")).unwrap();
        assert_eq!(record.port_number(), None);
    }

    #[test]
    fn test_set_credentials_is_atomic() {
        let mut record = ConnectionRecord::new();
        record.set_credentials("alice", Some("pw")).unwrap();

        let long_password = "x".repeat(32);
        let err = record
            .set_credentials("bob", Some(&long_password))
            .unwrap_err();
        assert_eq!(err.field(), Some(Field::Password));
        assert_eq!(record.user().unwrap(), "alice");
        assert_eq!(record.password().unwrap(), "pw");
    }

    #[test]
    fn test_set_credentials_without_password_clears_it() {
        let mut record = ConnectionRecord::new();
        record.set_credentials("alice", Some("pw")).unwrap();
        record.set_credentials("alice", None).unwrap();
        assert!(record.flags().contains(PresenceFlags::HAS_USER));
        assert!(record.password().is_none());

        record.clear_credentials();
        assert!(record.user().is_none());
    }

    #[test]
    fn test_set_options_tracks_ssl() {
        let mut record = ConnectionRecord::new();
        record.set_options(Some("sslmode=require")).unwrap();
        assert!(record.ssl_enabled());

        record.set_options(Some("sslmode=disable")).unwrap();
        assert!(!record.ssl_enabled());
        assert!(record.options().is_some());

        record.set_options(Some("sslmode=require&application_name=x")).unwrap();
        assert!(record.ssl_enabled());
        record.set_options(None).unwrap();
        assert!(!record.ssl_enabled());
        assert!(record.options().is_none());
    }

    #[test]
    fn test_requires_ssl_prefix_only() {
        assert!(requires_ssl(b"sslmode=require"));
        assert!(!requires_ssl(b"sslmode=requir"));
        assert!(!requires_ssl(b"x=1&sslmode=require"));
    }

    #[test]
    fn test_oversized_host_leaves_record_unchanged() {
        let mut record = ConnectionRecord::with_host("db").unwrap();
        assert!(record.set_host(&"h".repeat(64)).is_err());
        assert_eq!(record.host(), "db");
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut record = ConnectionRecord::with_host("db").unwrap();
        record.set_credentials("alice", Some("hunter2")).unwrap();
        let debug = format!("{record:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let record =
            ConnectionRecord::parse("postgresql://u:p@h:6543/d?sslmode=require").unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["host"], "h");
        assert_eq!(json["port"], "6543");
        assert_eq!(json["ssl_enabled"], true);

        let back: ConnectionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_rejects_password_without_user() {
        let json = serde_json::json!({ "host": "h", "password": "p" });
        assert!(serde_json::from_value::<ConnectionRecord>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_oversized_field() {
        let json = serde_json::json!({ "host": "h", "user": "u".repeat(40) });
        assert!(serde_json::from_value::<ConnectionRecord>(json).is_err());
    }
}
