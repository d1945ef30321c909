//! Extraction of the `scope` query parameter.

use url::form_urlencoded;

use super::{ensure_scheme_separator, is_url, SCOPE_PARAM};
use crate::error::UrlError;
use crate::path::Scope;

/// Splits a configured url into the backend url and the requested scope.
///
/// Strings without `://` are local paths: returned as-is with
/// [`Scope::Global`]. For urls, every `scope` pair is removed (the last
/// non-empty one wins) and the remaining pairs are re-encoded in their
/// original order. Everything before the `?` and after a `#` is kept byte
/// for byte. A url whose query carries no `scope` pair is returned unchanged.
pub fn split_scope(raw: &str) -> Result<(String, Scope), UrlError> {
    if !is_url(raw) {
        return Ok((raw.to_string(), Scope::Global));
    }
    let Some((base, rest)) = raw.split_once('?') else {
        return Ok((raw.to_string(), Scope::Global));
    };
    let (query, fragment) = match rest.split_once('#') {
        Some((query, fragment)) => (query, Some(fragment)),
        None => (rest, None),
    };

    let mut found = false;
    let mut scope = Scope::Global;
    let mut kept: Vec<(String, String)> = Vec::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == SCOPE_PARAM {
            found = true;
            // Blank values carry no scope.
            if !value.is_empty() {
                scope = value.parse::<Scope>()?;
            }
        } else {
            kept.push((key.into_owned(), value.into_owned()));
        }
    }
    if !found {
        return Ok((raw.to_string(), Scope::Global));
    }

    let mut url = ensure_scheme_separator(base);
    if !kept.is_empty() {
        url.push('?');
        url.push_str(
            &form_urlencoded::Serializer::new(String::new())
                .extend_pairs(kept.iter())
                .finish(),
        );
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    Ok((url, scope))
}
