//! Path descriptors: the `(name, url, scope)` triples declared in configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScopeError, ValidationError};

/// Name used internally for the registry's collection of paths.
pub const RESERVED_KEY: &str = "paths";

/// Leading character reserved for internal members.
pub const RESERVED_PREFIX: char = '_';

/// Rust keywords (strict and reserved) that are not accepted as path names.
const RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Lifetime of the handle created for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    /// One handle per registry, shared by every caller.
    #[default]
    #[serde(rename = "global")]
    Global,
    /// One handle per context, never shared across contexts.
    #[serde(rename = "ctx", alias = "context")]
    Context,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Context => "ctx",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Scope::Global),
            "ctx" | "context" => Ok(Scope::Context),
            other => Err(ScopeError(other.to_string())),
        }
    }
}

/// Anything accepted as a scope argument: the enum itself or its string forms.
pub trait IntoScope {
    fn into_scope(self) -> Result<Scope, ScopeError>;
}

impl IntoScope for Scope {
    fn into_scope(self) -> Result<Scope, ScopeError> {
        Ok(self)
    }
}

impl IntoScope for &str {
    fn into_scope(self) -> Result<Scope, ScopeError> {
        self.parse()
    }
}

impl IntoScope for String {
    fn into_scope(self) -> Result<Scope, ScopeError> {
        self.as_str().parse()
    }
}

/// Immutable record of a registered path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathDescriptor {
    name: String,
    url: String,
    scope: Scope,
}

impl PathDescriptor {
    /// Builds a descriptor after validating `name`.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        scope: Scope,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            url: url.into(),
            scope,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

/// Checks that `name` can be used as a path name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }
    if name == RESERVED_KEY {
        return Err(ValidationError::ReservedKey);
    }
    if name.starts_with(RESERVED_PREFIX) {
        return Err(ValidationError::ReservedPrefix(name.to_string()));
    }
    if RESERVED_WORDS.contains(&name) {
        return Err(ValidationError::ReservedWord(name.to_string()));
    }
    Ok(())
}
