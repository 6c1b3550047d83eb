//! Fuzz target for the connection string decoder.
//!
//! Feeds arbitrary bytes to `parse`; any record it accepts must re-encode
//! within `MAX_ENCODED_LEN` and decode again to the same record.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_parse
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pgurl::{MAX_ENCODED_LEN, encode, parse};

fuzz_target!(|data: &[u8]| {
    // The decoder should never panic, only return errors
    let Ok((record, consumed)) = parse(data) else {
        return;
    };
    assert_eq!(consumed, data.len());

    let mut buf = [0u8; MAX_ENCODED_LEN];
    let len = encode(&record, &mut buf).expect("canonical form fits MAX_ENCODED_LEN");

    // An explicit 5432 is dropped on encode, so compare everything but that flag.
    let (reparsed, _) = parse(&buf[..len]).expect("canonical form parses");
    assert_eq!(reparsed.host(), record.host());
    assert_eq!(reparsed.port(), record.port());
    assert_eq!(reparsed.database(), record.database());
    assert_eq!(reparsed.user(), record.user());
    assert_eq!(reparsed.password(), record.password());
    assert_eq!(reparsed.options(), record.options());
    assert_eq!(reparsed.ssl_enabled(), record.ssl_enabled());
});
