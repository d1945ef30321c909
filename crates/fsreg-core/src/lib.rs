//! Named filesystem registry.
//!
//! Configuration binds logical path names to backend urls:
//!
//! ```toml
//! [path]
//! uploads = "osfs:///var/lib/app/uploads"
//! scratch = "mem://?scope=ctx"
//! ```
//!
//! [`init::init`] turns that into a shared [`Registry`]. Global paths are
//! opened once and shared through [`Registry::get`]; context paths are opened
//! once per request/session context through its [`ContextProxy`].

pub mod backend;
pub mod config;
pub mod context;
pub mod ctx;
pub mod error;
pub mod init;
pub mod logging;
pub mod path;
pub mod registry;
pub mod url_model;

pub use backend::{DefaultOpener, Filesystem, FsHandle, Opener};
pub use context::ContextProxy;
pub use ctx::{Context, ContextManager, ContextMembers};
pub use error::{FsError, InitError, RegistryError, ValidationError};
pub use path::{PathDescriptor, Scope};
pub use registry::Registry;
