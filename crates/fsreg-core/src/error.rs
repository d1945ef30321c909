//! Error types for the path registry, its initializer and the backend seam.
//!
//! Everything raised while reading configuration is reported as [`InitError`];
//! lookups and registrations on a live registry report [`RegistryError`].

use thiserror::Error;

/// A path name that cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("path name must not be empty")]
    Empty,

    #[error("path name must not be \"paths\"")]
    ReservedKey,

    #[error("path name must not start with an underscore: {0}")]
    ReservedPrefix(String),

    #[error("path name must not be a reserved word: {0}")]
    ReservedWord(String),
}

/// Unknown scope string (anything other than `global`, `ctx` or `context`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid scope {0:?}: expected \"global\" or \"ctx\"")]
pub struct ScopeError(pub String);

/// Errors raised by [`Registry`](crate::registry::Registry) and
/// [`ContextProxy`](crate::context::ContextProxy).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot register further paths: registry already finalized")]
    Finalized,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    InvalidScope(#[from] ScopeError),

    #[error("path already registered: {0}")]
    Duplicate(String),

    /// Not registered, or registered with a scope the accessor cannot see.
    #[error("no such path: {0}")]
    NotFound(String),

    #[error("path {0} is read-only: registered paths cannot be removed")]
    ReadOnly(String),

    #[error("failed to open path {name}: {source}")]
    Backend {
        name: String,
        #[source]
        source: FsError,
    },
}

impl RegistryError {
    /// True for lookups of unknown (or invisible) names.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }
}

/// Problems found in a configured backend url.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// Errors raised by the request/session context subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CtxError {
    #[error("context member name must not be empty")]
    EmptyMemberName,

    #[error("context member already registered: {0}")]
    DuplicateMember(String),
}

/// Failure while building a registry from configuration.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("cannot register path {0:?} with scope=ctx without a configured ctx module")]
    ContextUnavailable(String),

    #[error("path {name:?}: {source}")]
    Url {
        name: String,
        #[source]
        source: UrlError,
    },

    /// Registration failed; carries the registry's message unchanged.
    #[error("{0}")]
    Registration(#[source] RegistryError),

    #[error("cannot register ctx member {member:?}: {source}")]
    Member {
        member: String,
        #[source]
        source: CtxError,
    },
}

/// Errors from filesystem backends.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("not a directory: {0}")]
    DirectoryExpected(String),

    #[error("not a file: {0}")]
    FileExpected(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("no backend for url: {0}")]
    UnsupportedProtocol(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl FsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::ResourceNotFound(_))
    }
}
