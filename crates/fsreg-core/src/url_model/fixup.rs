//! Repair for urls that lost their `//` after the query was rewritten.

use super::SCHEME_SEPARATOR;

/// Turns `mem:` into `mem://` so openers do not mistake it for a local path.
///
/// Strings that already contain `://`, or have no scheme at all, are
/// returned unchanged.
pub fn ensure_scheme_separator(url: &str) -> String {
    if url.contains(SCHEME_SEPARATOR) || !url.contains(':') {
        return url.to_string();
    }
    url.replacen(':', SCHEME_SEPARATOR, 1)
}
