//! Building a [`Registry`] from configuration.

use std::any::Any;
use std::sync::Arc;

use crate::backend::{DefaultOpener, Opener};
use crate::config::RegistryConfig;
use crate::ctx::ContextMembers;
use crate::error::InitError;
use crate::path::{validate_name, Scope};
use crate::registry::Registry;
use crate::url_model::split_scope;

/// Initializes a registry with the built-in backends.
///
/// When `ctx` is given, a [`ContextProxy`](crate::context::ContextProxy)
/// factory is registered on it under `conf.ctx.member` (unless that is
/// `none`), so every new context gets its own proxy.
pub fn init(
    conf: &RegistryConfig,
    ctx: Option<&mut dyn ContextMembers>,
) -> Result<Arc<Registry>, InitError> {
    init_with_opener(conf, ctx, Arc::new(DefaultOpener))
}

/// Like [`init`], opening backends through `opener`.
pub fn init_with_opener(
    conf: &RegistryConfig,
    ctx: Option<&mut dyn ContextMembers>,
    opener: Arc<dyn Opener>,
) -> Result<Arc<Registry>, InitError> {
    let mut registry = Registry::with_opener(opener);

    for (name, raw_url) in &conf.path {
        let (url, scope) = split_scope(raw_url).map_err(|source| InitError::Url {
            name: name.clone(),
            source,
        })?;
        validate_name(name).map_err(|e| InitError::Registration(e.into()))?;
        if scope == Scope::Context && ctx.is_none() {
            tracing::warn!(name = name.as_str(), "scope=ctx path declared without a ctx module");
            return Err(InitError::ContextUnavailable(name.clone()));
        }
        registry
            .register(name.as_str(), url, scope)
            .map_err(InitError::Registration)?;
    }
    registry.finalize();
    let registry = Arc::new(registry);

    if let Some(ctx) = ctx {
        if let Some(member) = conf.ctx.member_name() {
            let shared = Arc::clone(&registry);
            ctx.register_member(
                member,
                Box::new(move || Box::new(shared.context_proxy()) as Box<dyn Any + Send>),
            )
            .map_err(|source| InitError::Member {
                member: member.to_string(),
                source,
            })?;
        }
    }

    tracing::info!(
        paths = registry.len(),
        ctx_member = conf.ctx.member_name().unwrap_or("none"),
        "path registry initialized"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextProxy;
    use crate::ctx::ContextManager;
    use crate::error::{CtxError, RegistryError, ValidationError};

    fn conf(pairs: &[(&str, &str)]) -> RegistryConfig {
        RegistryConfig::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn blank_start() {
        let reg = init(&RegistryConfig::default(), None).unwrap();
        assert!(reg.is_empty());
        assert!(reg.is_finalized());
    }

    #[test]
    fn simple_url_resolves() {
        let reg = init(&conf(&[("path.foo", "mem://")]), None).unwrap();
        assert!(reg.contains("foo"));
        let fs = reg.get("foo").unwrap();
        assert!(format!("{fs:?}").starts_with("MemoryFs"));
    }

    #[test]
    fn reserved_key_fails() {
        assert!(init(&conf(&[("path.path", "mem://")]), None).is_ok());
        let err = init(&conf(&[("path.paths", "mem://")]), None).unwrap_err();
        assert!(matches!(
            err,
            InitError::Registration(RegistryError::Invalid(ValidationError::ReservedKey))
        ));
    }

    #[test]
    fn underscore_prefix_fails() {
        let err = init(&conf(&[("path._path", "mem://")]), None).unwrap_err();
        assert!(matches!(err, InitError::Registration(_)));
        assert!(err.to_string().contains("underscore"));
    }

    #[test]
    fn ctx_scope_requires_ctx_module() {
        assert!(init(&conf(&[("path.path", "mem://")]), None).is_ok());
        let cfg = conf(&[("path.path", "mem://?scope=ctx")]);
        let err = init(&cfg, None).unwrap_err();
        assert!(matches!(err, InitError::ContextUnavailable(ref n) if n == "path"));

        let mut mgr = ContextManager::new();
        let reg = init(&cfg, Some(&mut mgr)).unwrap();
        assert!(reg.contains("path"));
        assert!(mgr.has_member("fs"));
    }

    #[test]
    fn bad_scope_value_fails() {
        let mut mgr = ContextManager::new();
        let err = init(&conf(&[("path.x", "mem://?scope=session")]), Some(&mut mgr)).unwrap_err();
        assert!(matches!(err, InitError::Url { .. }));
    }

    #[test]
    fn odd_url_without_scope_is_left_to_the_opener() {
        let reg = init(
            &conf(&[("path.p", "osfs://my dir/x"), ("path.q", "osfs://host:99999/x")]),
            None,
        )
        .unwrap();
        assert_eq!(reg.descriptor("p").unwrap().url(), "osfs://my dir/x");
        assert_eq!(reg.descriptor("q").unwrap().url(), "osfs://host:99999/x");
    }

    #[test]
    fn member_name_is_configurable() {
        let mut mgr = ContextManager::new();
        init(
            &conf(&[("ctx.member", "files"), ("path.foo", "mem://")]),
            Some(&mut mgr),
        )
        .unwrap();
        let ctx = mgr.new_context();
        assert!(ctx.member::<ContextProxy>("files").is_some());
        assert!(!ctx.has_member("fs"));
    }

    #[test]
    fn member_none_skips_registration() {
        let mut mgr = ContextManager::new();
        init(
            &conf(&[("ctx.member", "none"), ("path.foo", "mem://?scope=ctx")]),
            Some(&mut mgr),
        )
        .unwrap();
        assert_eq!(mgr.member_names().count(), 0);
    }

    #[test]
    fn member_clash_is_init_error() {
        let mut mgr = ContextManager::new();
        mgr.register_member("fs", Box::new(|| Box::new(()) as Box<dyn Any + Send>))
            .unwrap();
        let err = init(&conf(&[("path.foo", "mem://")]), Some(&mut mgr)).unwrap_err();
        assert!(matches!(
            err,
            InitError::Member {
                source: CtxError::DuplicateMember(_),
                ..
            }
        ));
    }
}
