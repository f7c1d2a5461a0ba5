//! Conversion between an identity's printable form and a URL path segment.
//!
//! The escape set matches what a single path segment may carry unescaped:
//! unreserved characters plus `$ & + : = @`. Everything else, including the
//! segment delimiters `/ ? ; ,` and `%` itself, is percent-escaped.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{TypeError, TypeResult};
use crate::identity::UrlIdentity;

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Escape a printable identity for use as one path segment.
pub fn encode(printable: &str) -> String {
    utf8_percent_encode(printable, PATH_SEGMENT).to_string()
}

/// Decode a path segment back into an identity.
///
/// Rejects malformed escapes instead of passing them through, so a segment
/// decodes to at most one identity.
pub fn decode(segment: &str) -> TypeResult<UrlIdentity> {
    let bytes = segment.as_bytes();
    for (offset, _) in segment.match_indices('%') {
        let well_formed = bytes
            .get(offset + 1..offset + 3)
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(TypeError::InvalidEscape { offset });
        }
    }

    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| TypeError::InvalidUtf8)?;
    Ok(UrlIdentity::new(decoded.into_owned()))
}
