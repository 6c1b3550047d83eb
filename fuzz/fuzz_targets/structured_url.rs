//! Structured fuzz target: builds connection strings from arbitrary parts.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_structured_url
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pgurl::{ConnectionRecord, UrlError};

/// Connection string parts, free of delimiters so each lands in its own field.
#[derive(Debug, Arbitrary)]
struct FuzzUrl {
    long_scheme: bool,
    user: Option<String>,
    password: Option<String>,
    host: String,
    port: Option<u16>,
    database: Option<String>,
    options: Option<String>,
}

impl FuzzUrl {
    fn to_url(&self) -> String {
        let mut url = String::from(if self.long_scheme {
            "postgresql://"
        } else {
            "postgres://"
        });

        if let Some(ref user) = self.user {
            url.push_str(&sanitize(user));
            if let Some(ref password) = self.password {
                url.push(':');
                url.push_str(&sanitize(password));
            }
            url.push('@');
        }

        url.push_str(&sanitize(&self.host));
        if let Some(port) = self.port {
            url.push_str(&format!(":{port}"));
        }
        if let Some(ref database) = self.database {
            url.push('/');
            url.push_str(&sanitize(database));
            if let Some(ref options) = self.options {
                url.push('?');
                url.push_str(&options.replace('@', ""));
            }
        }
        url
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '@' | ':' | '/' | '?'))
        .collect()
}

fuzz_target!(|input: FuzzUrl| {
    let url = input.to_url();
    match ConnectionRecord::parse(&url) {
        Ok(record) => {
            assert_eq!(record.user().is_some(), input.user.is_some());
            assert_eq!(
                record.password().is_some(),
                input.user.is_some() && input.password.is_some()
            );
            assert_eq!(record.has_explicit_port(), input.port.is_some());
            assert_eq!(record.database().is_some(), input.database.is_some());

            let back = ConnectionRecord::parse(&record.to_url()).expect("canonical form parses");
            assert_eq!(back.host(), record.host());
            assert_eq!(back.database(), record.database());
        }
        Err(UrlError::FieldTooLarge { .. }) => {}
        Err(e) => panic!("unexpected error for {url:?}: {e}"),
    }
});
