//! Filename extraction from `Content-Disposition` headers.

use std::borrow::Cow;

/// Charset prefix of an RFC 5987 extended value (`filename*=`).
const UTF8_PREFIX: &str = "UTF-8''";

/// Pull the download filename out of a `Content-Disposition` value.
///
/// Takes everything after the last `=`. An extended value of the form
/// `UTF-8''<percent-encoded>` is percent-decoded; if decoding fails
/// (bad escape or invalid UTF-8) the encoded text is returned
/// unchanged. Plain values have surrounding whitespace and double
/// quotes removed.
///
/// ```
/// use dropconv_core::filename_from_disposition;
///
/// assert_eq!(
///     filename_from_disposition("attachment; filename*=UTF-8''a%20b.epub"),
///     "a b.epub",
/// );
/// assert_eq!(filename_from_disposition("attachment; filename=book.epub"), "book.epub");
/// ```
#[must_use]
pub fn filename_from_disposition(header: &str) -> String {
    let raw = header
        .rfind('=')
        .map_or(header, |i| &header[i + 1..])
        .trim();

    match raw.strip_prefix(UTF8_PREFIX) {
        Some(encoded) => urlencoding::decode(encoded).map_or_else(|_| encoded.to_owned(), Cow::into_owned),
        None => raw.trim_matches('"').to_owned(),
    }
}
