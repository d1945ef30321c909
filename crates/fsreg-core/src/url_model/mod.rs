//! Backend url handling.
//!
//! Configured urls may carry a `scope` query parameter that belongs to the
//! registry, not to the backend. It is stripped here before the url is handed
//! to an [`Opener`](crate::backend::Opener); every other parameter passes
//! through untouched.

mod fixup;
mod scope;

pub use fixup::ensure_scheme_separator;
pub use scope::split_scope;

/// Separator that marks a string as a url rather than a local path.
pub const SCHEME_SEPARATOR: &str = "://";

/// Query parameter reserved for the registry.
pub const SCOPE_PARAM: &str = "scope";

/// True if `raw` should be treated as a url instead of a local directory.
pub fn is_url(raw: &str) -> bool {
    raw.contains(SCHEME_SEPARATOR)
}
