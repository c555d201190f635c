//! The two symbol tables: one for names (values, functions, modules) and one
//! for types (structs, enums, traits, aliases, generic parameters).
//!
//! Each table is a stack of ribs. A rib belongs to the node that opened it
//! (a module, an item carrying generics, a block) and persists after it is
//! popped, so a module's bindings are still there when a later pass reopens
//! it.

use std::fmt;

use fxhash::{FxHashMap, FxHashSet};
use indexmap::IndexMap;
use miette::SourceSpan;
use osprey_syntax::NodeId;

use crate::canonical_path::CanonicalPath;
use crate::error::{InvariantViolation, ResolveResult};

/// Which of the two symbol tables a declaration lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Values, functions, modules, constants and locals.
    Name,
    /// Structs, enums, unions, traits, aliases and type parameters.
    Type,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Name => f.write_str("name"),
            Namespace::Type => f.write_str("type"),
        }
    }
}

/// One entry of a rib.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Key the binding was inserted under, relative to the rib's owner.
    pub path: CanonicalPath,
    /// The declaration it names.
    pub id: NodeId,
    /// Where it was declared, used as the earlier location of a duplicate.
    pub locus: SourceSpan,
}

/// Bindings introduced by one node.
#[derive(Debug, Clone)]
pub struct Rib {
    owner: NodeId,
    bindings: IndexMap<CanonicalPath, Binding>,
}

impl Rib {
    fn new(owner: NodeId) -> Self {
        Self { owner, bindings: IndexMap::new() }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn get(&self, path: &CanonicalPath) -> Option<&Binding> {
        self.bindings.get(path)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }
}

/// One namespace's symbol table.
///
/// Lookups walk the open ribs from innermost to outermost; duplicates are
/// only checked against the innermost one.
#[derive(Debug, Clone)]
pub struct Scope {
    namespace: Namespace,
    /// Every rib ever opened, by owner.
    ribs: FxHashMap<NodeId, Rib>,
    /// Owners of the currently open ribs, innermost last.
    stack: Vec<NodeId>,
    /// Every id bound in any rib, open or not.
    declared: FxHashSet<NodeId>,
}

impl Scope {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            ribs: FxHashMap::default(),
            stack: Vec::new(),
            declared: FxHashSet::default(),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Open `owner`'s rib, creating it on first use.
    pub fn push(&mut self, owner: NodeId) {
        self.ribs.entry(owner).or_insert_with(|| Rib::new(owner));
        self.stack.push(owner);
    }

    /// Close the innermost rib, which must belong to `owner`.
    pub fn pop(&mut self, owner: NodeId) -> ResolveResult<()> {
        match self.stack.pop() {
            Some(found) if found == owner => Ok(()),
            Some(found) => Err(InvariantViolation::UnbalancedScopeStack {
                namespace: self.namespace,
                expected: owner,
                found,
            }),
            None => Err(InvariantViolation::ScopeStackUnderflow { namespace: self.namespace }),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn peek(&self) -> Option<&Rib> {
        self.stack.last().and_then(|owner| self.ribs.get(owner))
    }

    pub fn rib(&self, owner: NodeId) -> Option<&Rib> {
        self.ribs.get(&owner)
    }

    /// Bind `path` to `id` in the innermost rib.
    ///
    /// If the innermost rib already binds an equal path and shadowing is not
    /// allowed, `on_duplicate` receives the earlier binding and the new one
    /// is dropped. Returns whether the binding was added.
    pub fn insert(
        &mut self,
        path: &CanonicalPath,
        id: NodeId,
        locus: SourceSpan,
        allow_shadow: bool,
        on_duplicate: impl FnOnce(&CanonicalPath, NodeId, SourceSpan),
    ) -> ResolveResult<bool> {
        let owner = *self
            .stack
            .last()
            .ok_or(InvariantViolation::ScopeStackUnderflow { namespace: self.namespace })?;
        let rib = self.ribs.entry(owner).or_insert_with(|| Rib::new(owner));

        if let Some(previous) = rib.bindings.get(path) {
            if !allow_shadow {
                on_duplicate(&previous.path, previous.id, previous.locus);
                return Ok(false);
            }
        }

        log::trace!("{} scope: {} -> {} in rib {}", self.namespace, path, id, owner);
        rib.bindings.insert(path.clone(), Binding { path: path.clone(), id, locus });
        self.declared.insert(id);
        Ok(true)
    }

    /// Innermost-first search through the open ribs.
    pub fn lookup(&self, path: &CanonicalPath) -> Option<NodeId> {
        self.lookup_binding(path).map(|binding| binding.id)
    }

    pub fn lookup_binding(&self, path: &CanonicalPath) -> Option<&Binding> {
        self.stack
            .iter()
            .rev()
            .filter_map(|owner| self.ribs.get(owner))
            .find_map(|rib| rib.get(path))
    }

    /// Whether `id` was ever bound in this namespace, in any rib, open or not.
    pub fn decl_was_declared_here(&self, id: NodeId) -> bool {
        self.declared.contains(&id)
    }
}
