//! Connection string decoder.

use super::field::Field;
use super::flags::PresenceFlags;
use super::record::{ConnectionRecord, requires_ssl};
use super::scan::split_at_byte;
use crate::error::{UrlError, UrlResult};
use tracing::debug;

/// Short scheme prefix.
pub const POSTGRES_SCHEME: &[u8] = b"postgres://";

/// Long scheme prefix, also the one the encoder emits.
pub const POSTGRESQL_SCHEME: &[u8] = b"postgresql://";

/// Inputs shorter than the short scheme prefix are rejected outright.
pub const MIN_INPUT_LEN: usize = POSTGRES_SCHEME.len();

/// Decode a connection string into a [`ConnectionRecord`].
///
/// Accepts `postgres(ql)://[user[:password]@]host[:port][/database][?options]`
/// and returns the record together with the number of bytes consumed, which
/// is always the full input length.
///
/// Segments are found purely by delimiter position. No percent-decoding or
/// numeric validation is applied; empty segments are kept and are distinct
/// from absent ones. A segment that does not fit its field fails with
/// [`UrlError::FieldTooLarge`] rather than being truncated.
///
/// # Examples
///
/// ```rust
/// use pgurl::{PresenceFlags, parse};
///
/// let (record, consumed) = parse(b"postgresql://u:p@h/d?sslmode=require").unwrap();
/// assert_eq!(consumed, 36);
/// assert_eq!(record.user().unwrap(), "u");
/// assert!(record.flags().contains(PresenceFlags::SSL_ENABLED));
/// assert!(!record.has_explicit_port());
/// ```
pub fn parse(input: &[u8]) -> UrlResult<(ConnectionRecord, usize)> {
    debug!(input_len = input.len(), "pgurl::parse()");

    if input.len() < MIN_INPUT_LEN {
        return Err(UrlError::InputTooShort {
            len: input.len(),
            min: MIN_INPUT_LEN,
        });
    }

    let rest = strip_scheme(input).ok_or(UrlError::MalformedScheme)?;

    let mut record = ConnectionRecord::new();
    let rest = decode_auth(&mut record, rest)?;
    if let Some(path) = decode_host_port(&mut record, rest)? {
        decode_path(&mut record, path)?;
    }

    debug!(
        host = %record.host,
        database = ?record.database(),
        flags = ?record.flags,
        "Connection string decoded"
    );
    Ok((record, input.len()))
}

fn strip_scheme(input: &[u8]) -> Option<&[u8]> {
    input
        .strip_prefix(POSTGRESQL_SCHEME)
        .or_else(|| input.strip_prefix(POSTGRES_SCHEME))
}

/// Consume `user[:password]@` if present and return what follows it.
fn decode_auth<'a>(record: &mut ConnectionRecord, rest: &'a [u8]) -> UrlResult<&'a [u8]> {
    let Some((auth, after)) = split_at_byte(rest, b'@') else {
        return Ok(rest);
    };

    match split_at_byte(auth, b':') {
        Some((user, password)) => {
            record.user.copy_from(Field::User, user)?;
            record.password.copy_from(Field::Password, password)?;
            record
                .flags
                .insert(PresenceFlags::HAS_USER | PresenceFlags::HAS_PASSWORD);
        }
        None => {
            record.user.copy_from(Field::User, auth)?;
            record.flags.insert(PresenceFlags::HAS_USER);
        }
    }

    Ok(after)
}

/// Consume `host[:port]` and return the path+query tail if a `/` follows.
fn decode_host_port<'a>(
    record: &mut ConnectionRecord,
    rest: &'a [u8],
) -> UrlResult<Option<&'a [u8]>> {
    let (authority, path) = match split_at_byte(rest, b'/') {
        Some((authority, path)) => (authority, Some(path)),
        None => (rest, None),
    };

    // The port search is confined to the authority, so a ':' in the path is
    // never mistaken for a port separator.
    match split_at_byte(authority, b':') {
        Some((host, port)) => {
            record.host.copy_from(Field::Host, host)?;
            record.port.copy_from(Field::Port, port)?;
            record.flags.insert(PresenceFlags::HAS_PORT);
        }
        None => record.host.copy_from(Field::Host, authority)?,
    }

    Ok(path)
}

/// Consume `database[?options]`.
fn decode_path(record: &mut ConnectionRecord, path: &[u8]) -> UrlResult<()> {
    match split_at_byte(path, b'?') {
        Some((database, options)) => {
            record.database.copy_from(Field::Database, database)?;
            record.options.copy_from(Field::Options, options)?;
            record
                .flags
                .insert(PresenceFlags::HAS_DATABASE | PresenceFlags::HAS_OPTIONS);
            if requires_ssl(options) {
                record.flags.insert(PresenceFlags::SSL_ENABLED);
            }
        }
        None => {
            record.database.copy_from(Field::Database, path)?;
            record.flags.insert(PresenceFlags::HAS_DATABASE);
        }
    }
    Ok(())
}
