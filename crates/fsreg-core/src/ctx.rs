//! Minimal request/session context subsystem.
//!
//! Subsystems register a named member factory once; every new [`Context`]
//! calls each factory and keeps the produced value until the context is
//! dropped. The initializer uses this to give each context its own
//! [`ContextProxy`](crate::context::ContextProxy).

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::error::CtxError;

/// Produces the value of one member for a new context.
pub type MemberFactory = Box<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

/// Anything that can host context members.
pub trait ContextMembers {
    fn register_member(&mut self, name: &str, factory: MemberFactory) -> Result<(), CtxError>;

    fn has_member(&self, name: &str) -> bool;
}

#[derive(Default)]
pub struct ContextManager {
    factories: IndexMap<String, MemberFactory>,
}

impl fmt::Debug for ContextManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextManager")
            .field("members", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ContextManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a context, creating one value per registered member.
    pub fn new_context(&self) -> Context {
        let members = self
            .factories
            .iter()
            .map(|(name, factory)| (name.clone(), factory()))
            .collect::<HashMap<_, _>>();
        tracing::trace!(members = members.len(), "context started");
        Context { members }
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl ContextMembers for ContextManager {
    fn register_member(&mut self, name: &str, factory: MemberFactory) -> Result<(), CtxError> {
        if name.is_empty() {
            return Err(CtxError::EmptyMemberName);
        }
        if self.factories.contains_key(name) {
            return Err(CtxError::DuplicateMember(name.to_string()));
        }
        tracing::debug!(member = name, "registered context member");
        self.factories.insert(name.to_string(), factory);
        Ok(())
    }

    fn has_member(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

/// One request/session context. Members live exactly as long as the context.
pub struct Context {
    members: HashMap<String, Box<dyn Any + Send>>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Context {
    /// Member `name`, if present and of type `T`.
    pub fn member<T: Any>(&self, name: &str) -> Option<&T> {
        self.members.get(name).and_then(|m| m.downcast_ref::<T>())
    }

    pub fn member_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.members.get_mut(name).and_then(|m| m.downcast_mut::<T>())
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unit_member() -> MemberFactory {
        Box::new(|| Box::new(()) as Box<dyn Any + Send>)
    }

    #[test]
    fn factory_runs_once_per_context() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut mgr = ContextManager::new();
        mgr.register_member(
            "counter",
            Box::new(move || {
                Box::new(seen.fetch_add(1, Ordering::SeqCst)) as Box<dyn Any + Send>
            }),
        )
        .unwrap();

        let first = mgr.new_context();
        let second = mgr.new_context();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first.member::<usize>("counter"), Some(&0));
        assert_eq!(second.member::<usize>("counter"), Some(&1));
    }

    #[test]
    fn wrong_type_or_name_yields_none() {
        let mut mgr = ContextManager::new();
        mgr.register_member("n", Box::new(|| Box::new(5u32) as Box<dyn Any + Send>)).unwrap();
        let mut ctx = mgr.new_context();
        assert!(ctx.has_member("n"));
        assert!(ctx.member::<String>("n").is_none());
        assert!(ctx.member::<u32>("missing").is_none());
        *ctx.member_mut::<u32>("n").unwrap() += 1;
        assert_eq!(ctx.member::<u32>("n"), Some(&6));
    }

    #[test]
    fn duplicate_and_empty_members_are_rejected() {
        let mut mgr = ContextManager::new();
        mgr.register_member("fs", unit_member()).unwrap();
        assert_eq!(
            mgr.register_member("fs", unit_member()),
            Err(CtxError::DuplicateMember("fs".to_string()))
        );
        assert_eq!(
            mgr.register_member("", unit_member()),
            Err(CtxError::EmptyMemberName)
        );
        assert_eq!(mgr.member_names().collect::<Vec<_>>(), vec!["fs"]);
    }
}
