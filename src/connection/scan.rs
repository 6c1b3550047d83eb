//! Delimiter scanning.

/// Find the offset of the first `needle` byte within `window`.
///
/// `memchr` compares in blocks and falls back to a byte-wise tail, so windows
/// of any length are scanned without reading past their end. Absence is
/// `None`, never an error.
///
/// ```rust
/// use pgurl::connection::find_byte;
///
/// assert_eq!(find_byte(b"user:pass", b':'), Some(4));
/// assert_eq!(find_byte(b"localhost", b':'), None);
/// ```
#[inline]
pub fn find_byte(window: &[u8], needle: u8) -> Option<usize> {
    memchr::memchr(needle, window)
}

/// Split `window` around the first `needle` byte.
///
/// The delimiter itself belongs to neither half.
#[inline]
pub(crate) fn split_at_byte(window: &[u8], needle: u8) -> Option<(&[u8], &[u8])> {
    find_byte(window, needle).map(|pos| (&window[..pos], &window[pos + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_occurrence() {
        assert_eq!(find_byte(b"a:b:c", b':'), Some(1));
        assert_eq!(find_byte(b":", b':'), Some(0));
    }

    #[test]
    fn test_find_in_empty_window() {
        assert_eq!(find_byte(b"", b'@'), None);
    }

    #[test]
    fn test_find_respects_window_bounds() {
        let buf = b"localhost@";
        assert_eq!(find_byte(&buf[..9], b'@'), None);
        assert_eq!(find_byte(buf, b'@'), Some(9));
    }

    #[test]
    fn test_find_past_block_boundary() {
        // Longer than a 16 or 32 byte block so the tail path is exercised.
        let mut buf = [b'x'; 70];
        buf[67] = b'/';
        assert_eq!(find_byte(&buf, b'/'), Some(67));
        assert_eq!(find_byte(&buf[..67], b'/'), None);
    }

    #[test]
    fn test_split_at_byte() {
        assert_eq!(
            split_at_byte(b"user:pass", b':'),
            Some((&b"user"[..], &b"pass"[..]))
        );
        assert_eq!(split_at_byte(b"user:", b':'), Some((&b"user"[..], &b""[..])));
        assert_eq!(split_at_byte(b"user", b':'), None);
    }
}
